// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Perl fragments run against CPAN.pm
//!
//! Every fragment is evaluated with CPAN.pm already loaded and the output
//! hooks from [`HOOKS`] in place. User-supplied text only ever reaches Perl
//! through [`perl_quote`].

use std::fmt;
use std::path::Path;

/// Route CPAN.pm's two report channels to unbuffered output.
///
/// Warnings are wrapped in SO/SI (`\x0e`, `\x0f`), the markers the captured
/// runner uses to tell them apart on the shared pipe.
pub const HOOKS: &str = r#"$| = 1;
{ my $old = select STDERR; $| = 1; select $old; }
$SIG{__WARN__} = sub { print STDERR "\x0e", @_, "\x0f" };
{
    no warnings 'redefine';
    *CPAN::Shell::myprint = sub { my ($self, $what) = @_; print STDOUT $what };
    *CPAN::Shell::mywarn = sub { my ($self, $what) = @_; print STDERR "\x0e$what\x0f" };
}
"#;

/// CPAN::Shell methods reachable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpanMethod {
    Clean,
    Make,
    Test,
    Install,
}

impl CpanMethod {
    pub fn name(self) -> &'static str {
        match self {
            CpanMethod::Clean => "clean",
            CpanMethod::Make => "make",
            CpanMethod::Test => "test",
            CpanMethod::Install => "install",
        }
    }
}

impl fmt::Display for CpanMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Plain,
    Force,
    NoTest,
}

/// Single-quoted Perl string literal.
pub fn perl_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('\'');
    for c in s.chars() {
        if c == '\\' || c == '\'' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('\'');
    quoted
}

pub fn method_call(method: CpanMethod, modifier: Modifier, module: &str) -> String {
    let module = perl_quote(module);
    match modifier {
        Modifier::Plain => format!("CPAN::Shell->{}({});", method.name(), module),
        Modifier::Force => format!("CPAN::Shell->force('{}', {});", method.name(), module),
        Modifier::NoTest => format!("CPAN::Shell->notest('{}', {});", method.name(), module),
    }
}

/// Make CPAN.pm take its configuration from `path`.
pub fn load_config_file(path: &Path) -> String {
    let file = perl_quote(&path.to_string_lossy());
    format!(
        "{{ my $file = {file}; do $file or die \"Could not load config file $file: \", ($@ || $!), \"\\n\"; \
         $INC{{'CPAN/MyConfig.pm'}} = $file; $CPAN::Config_loaded = 1; }}\n"
    )
}

pub const DISABLE_LOCKING: &str =
    "{ no warnings 'redefine'; *CPAN::_flock = sub { 1 }; *CPAN::checklock = sub { 1 }; }\n";

pub const CPAN_VERSION: &str = r#"print "$CPAN::VERSION\n";"#;

pub const INC_DIRS: &str = r#"print "$_\n" for grep { !ref } @INC;"#;

pub const URLLIST: &str =
    r#"CPAN::HandleConfig->load; print "URL\t$_\n" for @{ $CPAN::Config->{urllist} || [] };"#;

/// Key/value lines read back by `PerlDetails::parse`.
pub const DETAILS: &str = r#"CPAN::HandleConfig->load;
print "perl\t$^X\n";
printf "perl_version\t%vd\n", $^V;
print "cpan_version\t$CPAN::VERSION\n";
print "config\t", ($INC{'CPAN/MyConfig.pm'} || $INC{'CPAN/Config.pm'} || ''), "\n";
print "inc\t$_\n" for grep { !ref } @INC;
"#;

pub const DUMP_CONFIG: &str = r#"CPAN::HandleConfig->load;
require Data::Dumper;
local $Data::Dumper::Sortkeys = 1;
print Data::Dumper->Dump([$CPAN::Config], ['$CPAN::Config']);
"#;

pub const OUT_OF_DATE: &str = "CPAN::Shell->r;";

pub const AUTOBUNDLE: &str = "CPAN::Shell->autobundle;";

pub const RECOMPILE: &str = "CPAN::Shell->recompile;";

pub const UPGRADE: &str = "CPAN::Shell->upgrade;";

pub fn download(module: &str) -> String {
    format!("CPAN::Shell->get({});", perl_quote(module))
}

pub fn show_author(module: &str) -> String {
    format!(
        r#"{{ my $arg = {};
  my $module = CPAN::Shell->expand('Module', $arg);
  if (!$module) {{ print STDERR "Didn't find a $arg module, so no author!\n" }}
  elsif (my $id = $module->userid) {{
    my $author = CPAN::Shell->expand('Author', $id);
    printf "%-25s %-8s %-25s %s\n", $arg, $id, $author->email, $author->fullname;
  }}
}}"#,
        perl_quote(module)
    )
}

pub fn show_details(module: &str) -> String {
    format!(
        r#"{{ my $arg = {};
  my $module = CPAN::Shell->expand('Module', $arg);
  if (!$module) {{ print STDERR "Didn't find a $arg module!\n" }}
  elsif (my $id = $module->userid) {{
    my $author = CPAN::Shell->expand('Author', $id);
    print "$arg\n", "-" x 73, "\n\t";
    print join "\n\t",
      ($module->description || '(no description)'),
      $module->cpan_file,
      ($module->inst_file || '(not installed)'),
      'Installed: ' . ($module->inst_version || 'none'),
      'CPAN:      ' . $module->cpan_version . '  ' . ($module->uptodate ? '' : 'Not ') . 'up to date',
      $author->fullname . " ($id)",
      $author->email;
    print "\n\n";
  }}
}}"#,
        perl_quote(module)
    )
}

pub fn show_changes(module: &str) -> String {
    format!(
        r#"{{ my $arg = {};
  my $module = CPAN::Shell->expand('Module', $arg);
  my $dist = $module && $module->distribution;
  if (!$dist) {{ print STDERR "Didn't find a distribution for $arg!\n" }}
  else {{
    $dist->get;
    my ($changes) = grep {{ -f }} map {{ $dist->dir . "/$_" }} qw(Changes CHANGES ChangeLog Changes.md);
    if (!$changes) {{ print STDERR "No Changes file found for $arg\n" }}
    elsif (open my $fh, '<', $changes) {{ print while <$fh>; close $fh }}
    else {{ print STDERR "Could not open $changes: $!\n" }}
  }}
}}"#,
        perl_quote(module)
    )
}

pub fn author_modules(authors: &[String]) -> String {
    let authors: Vec<String> = authors.iter().map(|a| perl_quote(a)).collect();
    format!(
        r#"{{ my %wanted = map {{ lc $_ => 1 }} ({});
  for my $module (sort {{ $a->id cmp $b->id }} CPAN::Shell->expand('Module', '/./')) {{
    next unless $wanted{{ lc($module->userid || '') }};
    print $module->id, "\n";
  }}
}}"#,
        authors.join(", ")
    )
}
