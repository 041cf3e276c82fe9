// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! File utilities

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Create `path` and its parents; an existing directory is fine, anything
/// else in the way is an error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        bail!("not a directory: {}", path.display());
    }
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

/// Replace `path` with `content` in one rename.
///
/// The data goes to a hidden sibling named after this process first, so two
/// `cpan` runs saving the same config never write into each other's file and
/// readers see either the old or the new content.
pub fn safe_write(path: &Path, content: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(path)?;

    let written = fs::write(&temp_path, content)
        .with_context(|| format!("failed to write temp file: {}", temp_path.display()))
        .and_then(|_| {
            fs::rename(&temp_path, path).with_context(|| {
                format!("failed to rename {} to {}", temp_path.display(), path.display())
            })
        });

    if written.is_err() {
        // leftover from a failed write or rename
        let _ = fs::remove_file(&temp_path);
    }
    written
}

pub fn read_file_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => bail!("not a file path: {}", path.display()),
    };
    Ok(path.with_file_name(format!(".{}.{}.tmp", name, std::process::id())))
}
