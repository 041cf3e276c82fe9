// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! cpanutils - shared pieces of the cpan front end
//!
//! Output capture and classification for CPAN.pm build attempts, a process
//! runner that feeds a child's combined stdout and stderr into a capture
//! sink in write order, and small config/file helpers.

pub mod capture;
pub mod process;
pub mod file;

pub use capture::{Category, Classification, OutputLog, OutputSink};
pub use process::{run_captured, run_interactive, WARNING_END, WARNING_START};
pub use file::{ensure_dir, read_file_string, safe_write};

#[cfg(feature = "serde")]
pub mod config;

#[cfg(feature = "serde")]
pub use config::{Config, ConfigFile};
