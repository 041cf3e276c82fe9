// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Nothing to {0}!")]
    NothingTo(&'static str),

    #[error("-{switch} needs at least one {what}")]
    MissingArguments { switch: char, what: &'static str },

    #[error("could not read {what} from perl ({status})")]
    PerlQuery { what: &'static str, status: String },
}
