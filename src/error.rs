// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types shared across the crate.

use thiserror::Error;

/// Errors returned by command store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Another entry already holds this content.
    #[error("a command with the same content already exists")]
    DuplicateContent,

    /// Edited content was blank.
    #[error("command content is required")]
    ContentRequired,

    /// No entry matched the given content.
    #[error("command not found")]
    NotFound,

    /// Imported text is not a command list.
    #[error("import failed: {reason}")]
    MalformedImport { reason: String },
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::MalformedImport {
            reason: err.to_string(),
        }
    }
}

/// Errors produced when validating or decoding hex input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("input is empty")]
    Empty,

    #[error("hex input has an odd number of digits ({len})")]
    OddLength { len: usize },

    #[error("invalid hex digit '{ch}' at position {index}")]
    InvalidDigit { ch: char, index: usize },
}

/// Errors produced when parsing a user-entered baud rate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BaudError {
    #[error("invalid baud rate: '{input}'")]
    Invalid { input: String },
}
