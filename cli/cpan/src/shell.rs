// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! CPAN.pm driver

use crate::script;
use anyhow::Result;
use cpanutils::{run_captured, run_interactive, Config, OutputSink};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// The package-manager library the front end drives.
pub trait CpanShell {
    /// Load a CPAN.pm config file before anything else runs.
    fn load_config_file(&mut self, path: &Path);

    fn use_local_lib(&mut self);

    /// Turn off CPAN.pm's lock files.
    fn disable_locking(&mut self);

    /// Evaluate a Perl fragment with CPAN.pm loaded, recording both of its
    /// report channels into `sink`.
    fn eval(&mut self, script: &str, sink: &mut dyn OutputSink) -> Result<ExitStatus>;

    /// Start the interactive CPAN shell.
    fn interactive(&mut self) -> Result<ExitStatus>;
}

/// Runs CPAN.pm in a `perl` child process.
#[derive(Debug, Clone)]
pub struct PerlShell {
    perl: String,
    perl_args: Vec<String>,
    config_file: Option<PathBuf>,
    local_lib: bool,
    no_lock: bool,
}

impl PerlShell {
    pub fn new(perl: impl Into<String>) -> Self {
        Self {
            perl: perl.into(),
            perl_args: Vec::new(),
            config_file: None,
            local_lib: false,
            no_lock: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut shell = Self::new(config.perl.clone());
        shell.perl_args = config.perl_args.clone();
        if let Some(path) = &config.cpan_config {
            shell.load_config_file(path);
        }
        if config.local_lib {
            shell.use_local_lib();
        }
        if config.no_lock {
            shell.disable_locking();
        }
        shell
    }

    pub fn perl(&self) -> &str {
        &self.perl
    }

    fn prelude(&self) -> String {
        let mut prelude = String::new();
        if let Some(path) = &self.config_file {
            prelude.push_str(&script::load_config_file(path));
        }
        if self.no_lock {
            prelude.push_str(script::DISABLE_LOCKING);
        }
        prelude.push_str(script::HOOKS);
        prelude
    }

    fn command(&self, body: &str) -> Command {
        let mut cmd = Command::new(&self.perl);
        cmd.args(&self.perl_args);
        if self.local_lib {
            cmd.arg("-Mlocal::lib");
        }
        cmd.arg("-MCPAN").arg("-e").arg(format!("{}{}", self.prelude(), body));
        cmd
    }
}

impl CpanShell for PerlShell {
    fn load_config_file(&mut self, path: &Path) {
        self.config_file = Some(path.to_path_buf());
    }

    fn use_local_lib(&mut self) {
        self.local_lib = true;
    }

    fn disable_locking(&mut self) {
        self.no_lock = true;
    }

    fn eval(&mut self, script: &str, sink: &mut dyn OutputSink) -> Result<ExitStatus> {
        log::trace!("{} -MCPAN -e {:?}", self.perl, script);
        run_captured(&mut self.command(script), sink)
    }

    fn interactive(&mut self) -> Result<ExitStatus> {
        run_interactive(&mut self.command("CPAN::shell();"))
    }
}
