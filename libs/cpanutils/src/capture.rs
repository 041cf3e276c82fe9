// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Output capture and classification
//!
//! CPAN.pm reports progress through two channels, an informational one and
//! a warning one. An [`OutputLog`] records both in emission order for a
//! single build/install attempt and decides from the last line whether the
//! attempt succeeded, failed, or left no clear trace.

use std::fmt;

/// Last lines that mean the attempt failed.
pub const FAILURE_PATTERNS: &[&str] = &[
    "make: *** [install] Error 13",
    "make: *** [pure_site_install] Error 13",
    "make: *** No rule to make target `install'.  Stop.",
    "  make test had returned bad status, won't install without force",
    "  Make had some problems, won't install",
];

/// Last lines that mean the attempt succeeded.
pub const SUCCESS_PATTERNS: &[&str] = &[
    "Result: PASS",
    "  /usr/bin/make install  -- OK",
];

/// The channel a piece of output came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Info,
    Warning,
}

/// Outcome of a build/install attempt as read from its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    Failure,
    /// Neither a success nor a failure line; not an error.
    Vague,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Success => write!(f, "success"),
            Classification::Failure => write!(f, "failure"),
            Classification::Vague => write!(f, "inconclusive"),
        }
    }
}

/// Receiver for text emitted on one of the two channels.
pub trait OutputSink {
    fn record(&mut self, text: &str, category: Category);
}

/// Append-only buffer of interleaved output from one attempt.
#[derive(Debug, Default, Clone)]
pub struct OutputLog {
    buf: String,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the buffer before a new attempt. Always returns `true`.
    pub fn clear(&mut self) -> bool {
        self.buf.clear();
        self.buf.is_empty()
    }

    /// Everything recorded since the last clear.
    pub fn all(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The final newline-terminated line, newline included.
    ///
    /// Text after the last newline is an unfinished line and is not
    /// returned. Empty when no complete line has been recorded.
    pub fn last_line(&self) -> &str {
        let complete = match self.buf.rfind('\n') {
            Some(end) => &self.buf[..=end],
            None => return "",
        };

        let body = &complete[..complete.len() - 1];
        match body.rfind('\n') {
            Some(start) => &complete[start + 1..],
            None => complete,
        }
    }

    /// The failure pattern the last line matches, if any.
    pub fn failure(&self) -> Option<&'static str> {
        matching(self.last_line(), FAILURE_PATTERNS)
    }

    /// The success pattern the last line matches, if any.
    pub fn success(&self) -> Option<&'static str> {
        matching(self.last_line(), SUCCESS_PATTERNS)
    }

    pub fn is_vague(&self) -> bool {
        self.failure().is_none() && self.success().is_none()
    }

    pub fn classify(&self) -> Classification {
        if self.failure().is_some() {
            Classification::Failure
        } else if self.success().is_some() {
            Classification::Success
        } else {
            Classification::Vague
        }
    }
}

impl OutputSink for OutputLog {
    fn record(&mut self, text: &str, _category: Category) {
        self.buf.push_str(text);
    }
}

fn matching(line: &str, patterns: &[&'static str]) -> Option<&'static str> {
    if line.is_empty() {
        return None;
    }
    patterns.iter().copied().find(|pattern| line.contains(pattern))
}
