// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! cpan - CPAN.pm Command Line Front End
//!
//! Maps option letters to CPAN::Shell methods and reports whether each
//! build/install attempt worked, judging from CPAN.pm's output.

mod app;
mod error;
mod installed;
mod mirrors;
mod script;
mod shell;

use anyhow::Result;
use app::{App, ITS_NOT_MY_FAULT};
use clap::Parser;
use cpanutils::{Config, ConfigFile};
use shell::PerlShell;
use std::io::{self, Write};
use std::path::PathBuf;

/// Easily interact with CPAN from the command line
#[derive(Parser, Debug)]
#[command(name = "cpan")]
#[command(author = "The Rustux Authors")]
#[command(about = "Easily interact with CPAN from the command line", long_about = None)]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Print this help
    #[arg(short = 'h')]
    help: bool,

    /// Print the script and CPAN.pm versions
    #[arg(short = 'v')]
    version: bool,

    /// Print detailed information about perl and CPAN.pm
    #[arg(short = 'V')]
    details: bool,

    /// Dump the CPAN.pm configuration
    #[arg(short = 'J')]
    dump_config: bool,

    /// Download the latest distribution of the modules
    #[arg(short = 'g')]
    download: bool,

    /// Show the Changes file of the modules
    #[arg(short = 'C')]
    changes: bool,

    /// Show the author of the modules
    #[arg(short = 'A')]
    author: bool,

    /// Show details of the modules
    #[arg(short = 'D')]
    module_details: bool,

    /// Show out of date modules
    #[arg(short = 'O')]
    out_of_date: bool,

    /// List all installed modules with their versions
    #[arg(short = 'l')]
    list_all: bool,

    /// List the modules of the given authors
    #[arg(short = 'L')]
    author_modules: bool,

    /// Create an autobundle
    #[arg(short = 'a')]
    autobundle: bool,

    /// Ping the configured mirrors
    #[arg(short = 'p')]
    ping: bool,

    /// Recompile dynamically loaded modules
    #[arg(short = 'r')]
    recompile: bool,

    /// Upgrade all installed modules
    #[arg(short = 'u')]
    upgrade: bool,

    /// Load this CPAN.pm config file
    #[arg(short = 'j', value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Load local::lib
    #[arg(short = 'I')]
    local_lib: bool,

    /// Turn off CPAN.pm lock files
    #[arg(short = 'F')]
    no_lock: bool,

    /// Run `make clean`
    #[arg(short = 'c')]
    clean: bool,

    /// Run `make`
    #[arg(short = 'm')]
    make: bool,

    /// Run `make test`
    #[arg(short = 't')]
    test: bool,

    /// Run `make install` (the default)
    #[arg(short = 'i')]
    install: bool,

    /// Force the chosen action
    #[arg(short = 'f')]
    force: bool,

    /// Skip tests for the chosen action
    #[arg(short = 'T')]
    notest: bool,

    /// Modules, distributions, or authors to act on
    #[arg(value_name = "MODULE")]
    modules: Vec<String>,
}

impl Args {
    /// Whether the single-letter switch was given.
    fn switch(&self, switch: char) -> bool {
        match switch {
            'h' => self.help,
            'v' => self.version,
            'V' => self.details,
            'J' => self.dump_config,
            'g' => self.download,
            'C' => self.changes,
            'A' => self.author,
            'D' => self.module_details,
            'O' => self.out_of_date,
            'l' => self.list_all,
            'L' => self.author_modules,
            'a' => self.autobundle,
            'p' => self.ping,
            'r' => self.recompile,
            'u' => self.upgrade,
            'j' => self.config_file.is_some(),
            'I' => self.local_lib,
            'F' => self.no_lock,
            'c' => self.clean,
            'm' => self.make,
            't' => self.test,
            'i' => self.install,
            'f' => self.force,
            'T' => self.notest,
            _ => false,
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn run() -> Result<i32> {
    let args = Args::parse();
    let config = Config::load()?;
    let shell = PerlShell::from_config(&config);
    log::trace!("using {}", shell.perl());

    let mut app = App::new(shell, io::stdout(), config.echo);
    app.run(&args)
}

fn main() {
    init_logging();

    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ITS_NOT_MY_FAULT
        }
    };

    std::process::exit(code);
}
