// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Process utilities

use crate::capture::{Category, OutputSink};
use anyhow::{Context, Result};
use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};

/// Opens a span of [`Category::Warning`] text in captured output.
pub const WARNING_START: char = '\u{0e}';
/// Closes a span opened by [`WARNING_START`].
pub const WARNING_END: char = '\u{0f}';

const CHUNK_SIZE: usize = 8 * 1024;

/// Run `cmd` with stdout and stderr sharing one pipe, feeding everything it
/// writes into `sink` in the order it was written.
///
/// Text is [`Category::Info`] unless the child wraps it in
/// [`WARNING_START`]/[`WARNING_END`]; the markers never reach the sink.
/// Fragments are passed on as soon as they are read, so prompts without a
/// trailing newline show up while the child waits for input.
pub fn run_captured(cmd: &mut Command, sink: &mut dyn OutputSink) -> Result<ExitStatus> {
    let program = cmd.get_program().to_string_lossy().into_owned();

    let (mut reader, writer) = io::pipe().context("failed to create output pipe")?;
    let stderr = writer.try_clone().context("failed to clone output pipe")?;

    let spawned = cmd
        .stdin(Stdio::inherit())
        .stdout(writer)
        .stderr(stderr)
        .spawn();

    // The command keeps the write ends until they are replaced; drop them so
    // the read below sees end of file when the child exits.
    cmd.stdout(Stdio::null()).stderr(Stdio::null());

    let mut child = spawned.with_context(|| format!("failed to run {}", program))?;

    let mut splitter = Splitter::default();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => splitter.feed(&buf[..n], sink),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                log::debug!("{}: {}", program, e);
                break;
            }
        }
    }
    splitter.finish(sink);

    child.wait().with_context(|| format!("failed to wait for {}", program))
}

/// Run `cmd` attached to the terminal.
pub fn run_interactive(cmd: &mut Command) -> Result<ExitStatus> {
    let program = cmd.get_program().to_string_lossy().into_owned();

    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to run {}", program))
}

/// Turns raw pipe reads into categorized text.
///
/// Holds back the bytes of a UTF-8 character cut by a read boundary until
/// the rest of it arrives.
#[derive(Debug)]
struct Splitter {
    pending: Vec<u8>,
    category: Category,
}

impl Default for Splitter {
    fn default() -> Self {
        Self { pending: Vec::new(), category: Category::Info }
    }
}

impl Splitter {
    fn feed(&mut self, bytes: &[u8], sink: &mut dyn OutputSink) {
        self.pending.extend_from_slice(bytes);
        let text = self.decode();
        self.emit(&text, sink);
    }

    fn finish(&mut self, sink: &mut dyn OutputSink) {
        if self.pending.is_empty() {
            return;
        }
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        self.emit(&text, sink);
    }

    fn decode(&mut self) -> String {
        let mut text = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(valid) => {
                    text.push_str(valid);
                    self.pending.clear();
                    return text;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(bad) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                        None => {
                            // incomplete character at the end of the read
                            self.pending.drain(..valid);
                            return text;
                        }
                    }
                }
            }
        }
    }

    fn emit(&mut self, text: &str, sink: &mut dyn OutputSink) {
        let mut rest = text;
        while !rest.is_empty() {
            match rest.find([WARNING_START, WARNING_END]) {
                Some(at) => {
                    if at > 0 {
                        sink.record(&rest[..at], self.category);
                    }
                    self.category = if rest[at..].starts_with(WARNING_START) {
                        Category::Warning
                    } else {
                        Category::Info
                    };
                    rest = &rest[at + 1..];
                }
                None => {
                    sink.record(rest, self.category);
                    rest = "";
                }
            }
        }
    }
}
