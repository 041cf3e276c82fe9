// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Installed module discovery for `-l`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledModule {
    pub name: String,
    pub version: Option<String>,
}

/// Every module under `dirs`, sorted by name. The first directory a module
/// is found in wins, as it would for `require`.
pub fn scan(dirs: &[PathBuf]) -> Vec<InstalledModule> {
    let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();

    for dir in dirs {
        let walker = WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || entry.file_name().to_str().is_some_and(is_identifier)
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::debug!("skipping: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(dir) else {
                continue;
            };
            if let Some(name) = module_name(relative) {
                found.entry(name).or_insert_with(|| entry.path().to_path_buf());
            }
        }
    }

    found
        .into_iter()
        .map(|(name, path)| {
            let version = std::fs::read(&path)
                .ok()
                .and_then(|bytes| parse_version(&String::from_utf8_lossy(&bytes)));
            InstalledModule { name, version }
        })
        .collect()
}

/// `Foo/Bar.pm` -> `Foo::Bar`.
pub fn module_name(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        parts.push(component.as_os_str().to_str()?);
    }

    let last = parts.pop()?.strip_suffix(".pm")?;
    parts.push(last);

    if parts.iter().all(|part| is_identifier(part)) {
        Some(parts.join("::"))
    } else {
        None
    }
}

/// The value of the first `$VERSION` assignment in a module's source.
pub fn parse_version(source: &str) -> Option<String> {
    for line in source.lines() {
        let line = line.trim_start();
        if line.starts_with('#') {
            continue;
        }

        let Some(at) = find_version_var(line) else {
            continue;
        };
        let rest = line[at..].trim_start();
        let Some(rhs) = rest.strip_prefix('=') else {
            continue;
        };
        if rhs.starts_with('=') || rhs.starts_with('~') {
            continue;
        }

        let rhs = rhs.split(';').next().unwrap_or("").trim();
        if let Some(quoted) = first_quoted(rhs) {
            return Some(quoted.to_string());
        }

        let number: String = rhs
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '_')
            .collect();
        if number.starts_with(|c: char| c.is_ascii_digit()) {
            return Some(number);
        }
    }
    None
}

/// Byte offset just past `$VERSION` or `$Some::Package::VERSION`.
fn find_version_var(line: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(pos) = line[from..].find("VERSION") {
        let start = from + pos;
        let end = start + "VERSION".len();
        let before = &line[..start];

        let sigil = before.ends_with('$')
            || (before.ends_with("::")
                && before
                    .trim_end_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == ':')
                    .ends_with('$'));
        let boundary = !line[end..].starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_');

        if sigil && boundary {
            return Some(end);
        }
        from = end;
    }
    None
}

fn first_quoted(s: &str) -> Option<&str> {
    let open = s.find(['\'', '"'])?;
    let quote = s[open..].chars().next()?;
    let body = &s[open + 1..];
    let close = body.find(quote)?;
    Some(&body[..close])
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
