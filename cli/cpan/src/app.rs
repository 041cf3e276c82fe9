// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Switch precedence and the method table

use crate::error::CliError;
use crate::installed;
use crate::mirrors;
use crate::script::{self, CpanMethod, Modifier};
use crate::shell::CpanShell;
use crate::Args;
use anyhow::Result;
use clap::CommandFactory;
use cpanutils::{Category, Classification, OutputLog, OutputSink};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitStatus;

pub const HEY_IT_WORKED: i32 = 0;
pub const I_DONT_KNOW_WHAT_HAPPENED: i32 = 1;
pub const ITS_NOT_MY_FAULT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Help,
    Version,
    Details,
    DumpConfig,
    Download,
    Changes,
    Author,
    ModuleDetails,
    OutOfDate,
    ListAll,
    AuthorModules,
    Autobundle,
    PingMirrors,
    Recompile,
    Upgrade,
}

struct MetaEntry {
    switch: char,
    /// What the switch's arguments name, if it needs any.
    takes: Option<&'static str>,
    description: &'static str,
    action: Action,
}

/// Switches that do their one thing and exit, in precedence order.
const META_TABLE: &[MetaEntry] = &[
    MetaEntry { switch: 'h', takes: None, description: "Printing help", action: Action::Help },
    MetaEntry { switch: 'v', takes: None, description: "Printing version", action: Action::Version },
    MetaEntry { switch: 'V', takes: None, description: "Printing detailed version", action: Action::Details },
    MetaEntry { switch: 'J', takes: None, description: "Dumping configuration", action: Action::DumpConfig },
    MetaEntry { switch: 'g', takes: Some("module"), description: "Downloading the latest distro", action: Action::Download },
    MetaEntry { switch: 'C', takes: Some("module"), description: "Showing Changes file", action: Action::Changes },
    MetaEntry { switch: 'A', takes: Some("module"), description: "Showing author", action: Action::Author },
    MetaEntry { switch: 'D', takes: Some("module"), description: "Showing details", action: Action::ModuleDetails },
    MetaEntry { switch: 'O', takes: None, description: "Showing out of date modules", action: Action::OutOfDate },
    MetaEntry { switch: 'l', takes: None, description: "Listing all modules", action: Action::ListAll },
    MetaEntry { switch: 'L', takes: Some("author"), description: "Showing author modules", action: Action::AuthorModules },
    MetaEntry { switch: 'a', takes: None, description: "Creating autobundle", action: Action::Autobundle },
    MetaEntry { switch: 'p', takes: None, description: "Pinging mirrors", action: Action::PingMirrors },
    MetaEntry { switch: 'r', takes: None, description: "Recompiling", action: Action::Recompile },
    MetaEntry { switch: 'u', takes: None, description: "Upgrading all modules", action: Action::Upgrade },
];

/// CPAN::Shell methods chosen by switch; install is the default.
const CPAN_SWITCHES: &[(char, CpanMethod)] = &[
    ('c', CpanMethod::Clean),
    ('m', CpanMethod::Make),
    ('t', CpanMethod::Test),
];

/// Shows CPAN.pm output as it is recorded.
struct Echo<'a, W: Write> {
    log: &'a mut OutputLog,
    out: &'a mut W,
    show: bool,
}

impl<W: Write> OutputSink for Echo<'_, W> {
    fn record(&mut self, text: &str, category: Category) {
        if self.show {
            let written = match category {
                Category::Info => self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()),
                Category::Warning => {
                    let mut err = io::stderr();
                    err.write_all(text.as_bytes()).and_then(|_| err.flush())
                }
            };
            if let Err(e) = written {
                log::debug!("could not echo output: {}", e);
            }
        }
        self.log.record(text, category);
    }
}

/// Keeps informational output for parsing; warnings only go to the debug log.
#[derive(Default)]
struct Stdout(String);

impl OutputSink for Stdout {
    fn record(&mut self, text: &str, category: Category) {
        match category {
            Category::Info => self.0.push_str(text),
            Category::Warning => log::debug!("{}", text.trim_end()),
        }
    }
}

/// What `-V` reports about the Perl side.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PerlDetails {
    pub perl: String,
    pub perl_version: String,
    pub cpan_version: String,
    pub config: Option<PathBuf>,
    pub inc: Vec<PathBuf>,
}

impl PerlDetails {
    pub fn parse(output: &str) -> Self {
        let mut details = Self::default();
        for line in output.lines() {
            let Some((key, value)) = line.split_once('\t') else {
                continue;
            };
            match key {
                "perl" => details.perl = value.to_string(),
                "perl_version" => details.perl_version = value.to_string(),
                "cpan_version" => details.cpan_version = value.to_string(),
                "config" if !value.is_empty() => details.config = Some(PathBuf::from(value)),
                "inc" => details.inc.push(PathBuf::from(value)),
                _ => {}
            }
        }
        details
    }
}

/// Dispatch context for one run of the front end.
pub struct App<S: CpanShell, W: Write> {
    shell: S,
    out: W,
    log: OutputLog,
    echo: bool,
}

impl<S: CpanShell, W: Write> App<S, W> {
    pub fn new(shell: S, out: W, echo: bool) -> Self {
        Self { shell, out, log: OutputLog::new(), echo }
    }

    #[cfg(test)]
    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    #[cfg(test)]
    pub fn shell(&self) -> &S {
        &self.shell
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    /// Apply setup switches, then run the first meta switch or the chosen
    /// CPAN method. Returns the process exit code.
    pub fn run(&mut self, args: &Args) -> Result<i32> {
        if let Some(path) = &args.config_file {
            log::debug!("Using config file {}", path.display());
            self.shell.load_config_file(path);
        }
        if args.local_lib {
            log::debug!("Loading local::lib");
            self.shell.use_local_lib();
        }
        if args.no_lock {
            log::debug!("Turning off CPAN.pm lock files");
            self.shell.disable_locking();
        }

        if let Some(entry) = META_TABLE.iter().find(|entry| args.switch(entry.switch)) {
            log::debug!("{}", entry.description);
            if let Some(what) = entry.takes {
                if args.modules.is_empty() {
                    return Err(CliError::MissingArguments { switch: entry.switch, what }.into());
                }
            }
            return self.run_meta(entry.action, &args.modules);
        }

        self.run_default(args)
    }

    fn run_default(&mut self, args: &Args) -> Result<i32> {
        let chosen = CPAN_SWITCHES
            .iter()
            .find(|(switch, _)| args.switch(*switch))
            .map(|(_, method)| *method);

        let method = match (chosen, args.modules.is_empty()) {
            (None, true) => {
                log::debug!("Starting the CPAN shell");
                return Ok(exit_code(self.shell.interactive()?));
            }
            (Some(method), true) => return Err(CliError::NothingTo(method.name()).into()),
            (chosen, false) => chosen.unwrap_or(CpanMethod::Install),
        };

        let modifier = if args.force {
            Modifier::Force
        } else if args.notest {
            Modifier::NoTest
        } else {
            Modifier::Plain
        };

        let mut failures = 0;
        for module in &args.modules {
            self.log.clear();
            let status = self.eval_echoed(&script::method_call(method, modifier, module), self.echo)?;

            match self.log.classify() {
                Classification::Failure => {
                    failures += 1;
                    log::warn!(
                        "{}: {} failed ({})",
                        module,
                        method,
                        self.log.failure().unwrap_or_default().trim()
                    );
                }
                Classification::Success => log::debug!("{}: {} worked", module, method),
                Classification::Vague => {
                    log::debug!("{}: could not tell whether {} worked (perl {})", module, method, status)
                }
            }
        }

        Ok(if failures > 0 { I_DONT_KNOW_WHAT_HAPPENED } else { HEY_IT_WORKED })
    }

    fn run_meta(&mut self, action: Action, args: &[String]) -> Result<i32> {
        match action {
            Action::Help => {
                let help = Args::command().render_help();
                write!(self.out, "{}", help)?;
                Ok(HEY_IT_WORKED)
            }
            Action::Version => self.print_version(),
            Action::Details => self.print_details(),
            Action::ListAll => self.list_all(),
            Action::PingMirrors => self.ping_mirrors(),
            Action::DumpConfig => self.eval_all(&[script::DUMP_CONFIG.to_string()]),
            Action::OutOfDate => self.eval_all(&[script::OUT_OF_DATE.to_string()]),
            Action::Autobundle => self.eval_all(&[script::AUTOBUNDLE.to_string()]),
            Action::Recompile => self.eval_all(&[script::RECOMPILE.to_string()]),
            Action::Upgrade => self.eval_all(&[script::UPGRADE.to_string()]),
            Action::AuthorModules => self.eval_all(&[script::author_modules(args)]),
            Action::Download => self.eval_all(&per_module(args, script::download)),
            Action::Changes => self.eval_all(&per_module(args, script::show_changes)),
            Action::Author => self.eval_all(&per_module(args, script::show_author)),
            Action::ModuleDetails => self.eval_all(&per_module(args, script::show_details)),
        }
    }

    fn eval_echoed(&mut self, script: &str, show: bool) -> Result<ExitStatus> {
        let mut sink = Echo { log: &mut self.log, out: &mut self.out, show };
        self.shell.eval(script, &mut sink)
    }

    /// Run each script with its output shown; any non-zero exit makes the
    /// whole run uncertain.
    fn eval_all(&mut self, scripts: &[String]) -> Result<i32> {
        let mut code = HEY_IT_WORKED;
        for script in scripts {
            self.log.clear();
            let status = self.eval_echoed(script, true)?;
            if !status.success() {
                log::debug!("perl exited with {}", status);
                code = I_DONT_KNOW_WHAT_HAPPENED;
            }
        }
        Ok(code)
    }

    fn query(&mut self, what: &'static str, script: &str) -> Result<String> {
        let mut stdout = Stdout::default();
        let status = self.shell.eval(script, &mut stdout)?;
        if !status.success() {
            return Err(CliError::PerlQuery { what, status: status.to_string() }.into());
        }
        Ok(stdout.0)
    }

    fn print_version(&mut self) -> Result<i32> {
        let cpan_version = match self.query("CPAN.pm version", script::CPAN_VERSION) {
            Ok(version) if !version.trim().is_empty() => version.trim().to_string(),
            Ok(_) => "unknown".to_string(),
            Err(e) => {
                log::debug!("{:#}", e);
                "unknown".to_string()
            }
        };

        writeln!(self.out, "cpan script version {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.out, "CPAN.pm version {}", cpan_version)?;
        Ok(HEY_IT_WORKED)
    }

    fn print_details(&mut self) -> Result<i32> {
        let details = PerlDetails::parse(&self.query("perl details", script::DETAILS)?);

        writeln!(self.out, "cpan script version {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.out, "perl:        {} ({})", details.perl, details.perl_version)?;
        writeln!(self.out, "CPAN.pm:     {}", details.cpan_version)?;
        match &details.config {
            Some(path) => writeln!(self.out, "CPAN config: {}", path.display())?,
            None => writeln!(self.out, "CPAN config: (none)")?,
        }
        writeln!(self.out, "@INC:")?;
        for dir in &details.inc {
            writeln!(self.out, "    {}", dir.display())?;
        }
        Ok(HEY_IT_WORKED)
    }

    fn list_all(&mut self) -> Result<i32> {
        let dirs: Vec<PathBuf> = self
            .query("@INC", script::INC_DIRS)?
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();

        for module in installed::scan(&dirs) {
            writeln!(self.out, "{}\t{}", module.name, module.version.as_deref().unwrap_or("undef"))?;
        }
        Ok(HEY_IT_WORKED)
    }

    fn ping_mirrors(&mut self) -> Result<i32> {
        let urls = mirrors::parse_urllist(&self.query("mirror list", script::URLLIST)?);
        if urls.is_empty() {
            log::warn!("No mirrors configured in CPAN.pm's urllist");
            return Ok(HEY_IT_WORKED);
        }

        for url in urls {
            let Some((host, port)) = mirrors::pingable(&url) else {
                log::debug!("Not pinging {}", url);
                continue;
            };
            let latency = mirrors::ping(&host, port, mirrors::PING_TIMEOUT);
            writeln!(self.out, "{}", mirrors::report_line(&url, latency))?;
        }
        Ok(HEY_IT_WORKED)
    }
}

fn per_module(args: &[String], build: fn(&str) -> String) -> Vec<String> {
    args.iter().map(|arg| build(arg)).collect()
}

pub fn exit_code(status: ExitStatus) -> i32 {
    if status.success() {
        HEY_IT_WORKED
    } else {
        I_DONT_KNOW_WHAT_HAPPENED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::collections::VecDeque;
    use std::os::unix::process::ExitStatusExt;
    use std::path::Path;

    /// Plays back canned output for each script it is asked to run.
    #[derive(Default)]
    struct FakeShell {
        scripts: Vec<String>,
        replies: VecDeque<(Vec<(Category, String)>, i32)>,
        config_file: Option<PathBuf>,
        local_lib: bool,
        no_lock: bool,
        interactive: usize,
    }

    impl FakeShell {
        fn reply(mut self, output: Vec<(Category, &str)>, code: i32) -> Self {
            let output = output.into_iter().map(|(c, text)| (c, text.to_string())).collect();
            self.replies.push_back((output, code));
            self
        }
    }

    impl CpanShell for FakeShell {
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
            self.scripts.push(script.to_string());
            let (output, code) = self.replies.pop_front().unwrap_or_default();
            for (category, text) in output {
                sink.record(&text, category);
            }
            Ok(ExitStatus::from_raw(code << 8))
        }

        fn interactive(&mut self) -> Result<ExitStatus> {
            self.interactive += 1;
            Ok(ExitStatus::from_raw(0))
        }
    }

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cpan").chain(argv.iter().copied())).unwrap()
    }

    fn run(shell: FakeShell, argv: &[&str]) -> (Result<i32>, App<FakeShell, Vec<u8>>) {
        let mut app = App::new(shell, Vec::new(), false);
        let result = app.run(&args(argv));
        (result, app)
    }

    fn output(app: App<FakeShell, Vec<u8>>) -> String {
        String::from_utf8(app.into_output()).unwrap()
    }

    #[test]
    fn test_modules_default_to_install() {
        let shell = FakeShell::default()
            .reply(vec![(Category::Info, "  /usr/bin/make install  -- OK\n")], 0)
            .reply(vec![(Category::Info, "Result: PASS\n")], 0);
        let (result, app) = run(shell, &["Try::Tiny", "Moo"]);

        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert_eq!(
            app.shell().scripts,
            vec!["CPAN::Shell->install('Try::Tiny');", "CPAN::Shell->install('Moo');"]
        );
    }

    #[test]
    fn test_explicit_install_switch() {
        let (result, app) = run(FakeShell::default(), &["-i", "Moo"]);
        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert_eq!(app.shell().scripts, vec!["CPAN::Shell->install('Moo');"]);
    }

    #[test]
    fn test_cpan_switch_precedence() {
        let (_, app) = run(FakeShell::default(), &["-t", "-m", "-c", "Moo"]);
        assert_eq!(app.shell().scripts, vec!["CPAN::Shell->clean('Moo');"]);

        let (_, app) = run(FakeShell::default(), &["-t", "-m", "Moo"]);
        assert_eq!(app.shell().scripts, vec!["CPAN::Shell->make('Moo');"]);

        let (_, app) = run(FakeShell::default(), &["-i", "-t", "Moo"]);
        assert_eq!(app.shell().scripts, vec!["CPAN::Shell->test('Moo');"]);
    }

    #[test]
    fn test_force_and_notest() {
        let (_, app) = run(FakeShell::default(), &["-f", "-T", "Moo"]);
        assert_eq!(app.shell().scripts, vec!["CPAN::Shell->force('install', 'Moo');"]);

        let (_, app) = run(FakeShell::default(), &["-T", "-m", "Moo"]);
        assert_eq!(app.shell().scripts, vec!["CPAN::Shell->notest('make', 'Moo');"]);
    }

    #[test]
    fn test_no_switch_no_args_starts_shell() {
        let (result, app) = run(FakeShell::default(), &[]);
        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert_eq!(app.shell().interactive, 1);
        assert!(app.shell().scripts.is_empty());
    }

    #[test]
    fn test_switch_without_args_is_an_error() {
        let (result, app) = run(FakeShell::default(), &["-m"]);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Nothing to make!");
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::NothingTo(method)) if *method == "make"));
        assert!(app.shell().scripts.is_empty());
        assert_eq!(app.shell().interactive, 0);
    }

    #[test]
    fn test_failure_is_counted() {
        let shell = FakeShell::default()
            .reply(vec![(Category::Info, "Result: PASS\n")], 0)
            .reply(
                vec![
                    (Category::Info, "Running make install\n"),
                    (Category::Warning, "make: *** [install] Error 13\n"),
                ],
                0,
            );
        let (result, app) = run(shell, &["Good", "Bad"]);

        assert_eq!(result.unwrap(), I_DONT_KNOW_WHAT_HAPPENED);
        assert_eq!(app.log().all(), "Running make install\nmake: *** [install] Error 13\n");
    }

    #[test]
    fn test_log_is_cleared_between_attempts() {
        let shell = FakeShell::default()
            .reply(vec![(Category::Warning, "  Make had some problems, won't install\n")], 0)
            .reply(vec![(Category::Info, "Result: PASS\n")], 0);
        let (result, app) = run(shell, &["Bad", "Good"]);

        assert_eq!(result.unwrap(), I_DONT_KNOW_WHAT_HAPPENED);
        assert_eq!(app.log().all(), "Result: PASS\n");
    }

    #[test]
    fn test_vague_is_not_a_failure() {
        let shell = FakeShell::default().reply(vec![(Category::Info, "Something unexpected\n")], 1);
        let (result, app) = run(shell, &["Odd"]);

        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert!(app.log().is_vague());
    }

    #[test]
    fn test_echo_writes_info_output() {
        let shell = FakeShell::default().reply(vec![(Category::Info, "Result: PASS\n")], 0);
        let mut app = App::new(shell, Vec::new(), true);
        app.run(&args(&["Moo"])).unwrap();

        assert_eq!(output(app), "Result: PASS\n");
    }

    #[test]
    fn test_meta_switch_wins_over_cpan_switches() {
        let (result, app) = run(FakeShell::default(), &["-i", "-O", "-m", "Moo"]);
        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert_eq!(app.shell().scripts, vec![script::OUT_OF_DATE]);
    }

    #[test]
    fn test_meta_precedence_order() {
        let shell = FakeShell::default().reply(vec![(Category::Info, "2.36\n")], 0);
        let (result, app) = run(shell, &["-u", "-a", "-v"]);

        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert_eq!(app.shell().scripts, vec![script::CPAN_VERSION]);
        let text = output(app);
        assert!(text.starts_with("cpan script version "));
        assert!(text.ends_with("CPAN.pm version 2.36\n"));
    }

    #[test]
    fn test_help_does_not_touch_perl() {
        let (result, app) = run(FakeShell::default(), &["-h", "-v", "Moo"]);
        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert!(app.shell().scripts.is_empty());
        assert!(output(app).contains("Usage:"));
    }

    #[test]
    fn test_version_without_perl() {
        let shell = FakeShell::default().reply(vec![(Category::Warning, "Can't locate CPAN.pm\n")], 2);
        let (result, app) = run(shell, &["-v"]);

        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert!(output(app).ends_with("CPAN.pm version unknown\n"));
    }

    #[test]
    fn test_setup_switches_apply_before_dispatch() {
        let (_, app) = run(FakeShell::default(), &["-j", "/tmp/MyConfig.pm", "-I", "-F", "-O"]);
        let shell = app.shell();

        assert_eq!(shell.config_file.as_deref(), Some(Path::new("/tmp/MyConfig.pm")));
        assert!(shell.local_lib);
        assert!(shell.no_lock);
        assert_eq!(shell.scripts, vec![script::OUT_OF_DATE]);
    }

    #[test]
    fn test_meta_with_missing_arguments() {
        let (result, app) = run(FakeShell::default(), &["-A"]);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "-A needs at least one module");
        assert!(app.shell().scripts.is_empty());
    }

    #[test]
    fn test_per_module_meta_runs_once_per_argument() {
        let shell = FakeShell::default().reply(vec![], 0).reply(vec![], 2);
        let (result, app) = run(shell, &["-D", "Moo", "Try::Tiny"]);

        assert_eq!(result.unwrap(), I_DONT_KNOW_WHAT_HAPPENED);
        assert_eq!(app.shell().scripts, vec![script::show_details("Moo"), script::show_details("Try::Tiny")]);
    }

    #[test]
    fn test_author_modules_single_query() {
        let (_, app) = run(FakeShell::default(), &["-L", "BDFOY", "ANDK"]);
        assert_eq!(
            app.shell().scripts,
            vec![script::author_modules(&["BDFOY".to_string(), "ANDK".to_string()])]
        );
    }

    #[test]
    fn test_details_output() {
        let shell = FakeShell::default().reply(
            vec![
                (Category::Warning, "CPAN: loading config\n"),
                (Category::Info, "perl\t/usr/bin/perl\nperl_version\t5.36.0\ncpan_version\t2.36\n"),
                (Category::Info, "config\t/home/me/.cpan/CPAN/MyConfig.pm\n"),
                (Category::Info, "inc\t/usr/share/perl5\ninc\t/usr/lib/perl5\n"),
            ],
            0,
        );
        let (result, app) = run(shell, &["-V"]);

        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        let text = output(app);
        assert!(text.contains("perl:        /usr/bin/perl (5.36.0)\n"));
        assert!(text.contains("CPAN.pm:     2.36\n"));
        assert!(text.contains("CPAN config: /home/me/.cpan/CPAN/MyConfig.pm\n"));
        assert!(text.ends_with("@INC:\n    /usr/share/perl5\n    /usr/lib/perl5\n"));
    }

    #[test]
    fn test_details_query_failure() {
        let shell = FakeShell::default().reply(vec![], 255);
        let (result, _) = run(shell, &["-V"]);
        let err = result.unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::PerlQuery { what, .. }) if *what == "perl details"));
    }

    #[test]
    fn test_list_all_reads_inc() {
        let lib = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(lib.path().join("Foo")).unwrap();
        std::fs::write(lib.path().join("Foo/Bar.pm"), "our $VERSION = '0.42';\n").unwrap();
        std::fs::write(lib.path().join("Baz.pm"), "1;\n").unwrap();

        let inc = format!("{}\n", lib.path().display());
        let shell = FakeShell::default().reply(vec![(Category::Info, inc.as_str())], 0);
        let (result, app) = run(shell, &["-l"]);

        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert_eq!(output(app), "Baz\tundef\nFoo::Bar\t0.42\n");
    }

    #[test]
    fn test_ping_skips_unpingable_mirrors() {
        let shell = FakeShell::default().reply(vec![(Category::Info, "URL\tfile:///minicpan/\n")], 0);
        let (result, app) = run(shell, &["-p"]);

        assert_eq!(result.unwrap(), HEY_IT_WORKED);
        assert_eq!(output(app), "");
    }

    #[test]
    fn test_perl_details_parse() {
        let details = PerlDetails::parse("perl\t/usr/bin/perl\nconfig\t\nnoise\ninc\t/lib\n");
        assert_eq!(
            details,
            PerlDetails {
                perl: "/usr/bin/perl".to_string(),
                inc: vec![PathBuf::from("/lib")],
                ..PerlDetails::default()
            }
        );
    }
}
