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

//! Hex text helpers.
//!
//! Validates, normalizes and pretty-prints the hex strings typed by the user
//! and shown in the serial log.

use crate::error::HexError;

/// How a payload typed by the user is turned into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMode {
    /// Input is hex digits, optionally separated by whitespace.
    Hex,
    /// Input is sent as raw UTF-8 text.
    Ascii,
}

impl SendMode {
    pub fn from_hex_flag(is_hex: bool) -> Self {
        if is_hex {
            SendMode::Hex
        } else {
            SendMode::Ascii
        }
    }

    pub fn is_hex(&self) -> bool {
        matches!(self, SendMode::Hex)
    }
}

/// Remove every whitespace character. Case and digits are left alone.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Check normalized input for emptiness, even length and hex digits.
pub fn validate(input: &str) -> Result<String, HexError> {
    let hex = normalize(input);
    if hex.is_empty() {
        return Err(HexError::Empty);
    }
    if let Some((index, ch)) = hex.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit { ch, index });
    }
    if hex.len() % 2 != 0 {
        return Err(HexError::OddLength { len: hex.len() });
    }
    Ok(hex)
}

/// True iff the normalized input is non-empty, even length and all hex digits.
pub fn is_valid_hex(input: &str) -> bool {
    validate(input).is_ok()
}

/// Group normalized input into space-separated pairs.
///
/// A trailing odd character becomes its own group; nothing is padded.
pub fn format_hex(hex: &str) -> String {
    let chars: Vec<char> = normalize(hex).chars().collect();
    chars
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase hex without separators.
pub fn encode_bytes(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Uppercase hex with a single space between bytes.
pub fn encode_bytes_spaced(data: &[u8]) -> String {
    format_hex(&encode_bytes(data))
}

/// Decode hex input into bytes after validating it.
pub fn decode(input: &str) -> Result<Vec<u8>, HexError> {
    let digits = validate(input)?;
    // validate() already rejected anything hex::decode could fail on
    hex::decode(&digits).map_err(|_| HexError::OddLength { len: digits.len() })
}

/// Turn user input into the bytes to put on the wire.
pub fn encode_payload(input: &str, mode: SendMode) -> Result<Vec<u8>, HexError> {
    match mode {
        SendMode::Hex => decode(input),
        SendMode::Ascii => {
            if input.trim().is_empty() {
                Err(HexError::Empty)
            } else {
                Ok(input.as_bytes().to_vec())
            }
        }
    }
}
