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

//! Baud rate options and connection defaults.
//!
//! The picker offers the standard rates in ascending order followed by a
//! "custom" entry. Rates the user enters by hand are slotted in just before
//! that entry.

use std::fmt;

use crate::error::BaudError;

/// Baud rate used when nothing else is known.
pub const DEFAULT_BAUD: u32 = 9600;

/// Longest custom baud rate accepted, in digits.
pub const MAX_CUSTOM_BAUD_DIGITS: usize = 9;

pub const STANDARD_BAUD_RATES: &[u32] = &[
    1200, 2400, 4800, 9600, 14400, 19200, 28800, 38400, 57600, 76800, 115200, 153600, 230400,
    307200, 460800, 921600,
];

/// One entry of the baud picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaudOption {
    Rate(u32),
    /// Prompts the user for a rate.
    Custom,
}

impl BaudOption {
    pub fn rate(&self) -> Option<u32> {
        match self {
            BaudOption::Rate(rate) => Some(*rate),
            BaudOption::Custom => None,
        }
    }
}

impl fmt::Display for BaudOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaudOption::Rate(rate) => write!(f, "{}", rate),
            BaudOption::Custom => write!(f, "Custom"),
        }
    }
}

/// Ordered baud picker entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaudOptions {
    options: Vec<BaudOption>,
}

impl Default for BaudOptions {
    fn default() -> Self {
        Self::standard()
    }
}

impl BaudOptions {
    /// Standard rates, sorted, then `Custom`.
    pub fn standard() -> Self {
        let mut rates = STANDARD_BAUD_RATES.to_vec();
        rates.sort_unstable();
        let mut options: Vec<BaudOption> = rates.into_iter().map(BaudOption::Rate).collect();
        options.push(BaudOption::Custom);
        Self { options }
    }

    pub fn options(&self) -> &[BaudOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn index_of(&self, baud: u32) -> Option<usize> {
        self.options.iter().position(|o| o.rate() == Some(baud))
    }

    /// Rate at `index`, or `None` for the custom entry or an out-of-range index.
    pub fn rate_at(&self, index: usize) -> Option<u32> {
        self.options.get(index).and_then(BaudOption::rate)
    }

    /// Rate at `index`, falling back to [`DEFAULT_BAUD`].
    pub fn selected_rate(&self, index: usize) -> u32 {
        self.rate_at(index).unwrap_or(DEFAULT_BAUD)
    }

    /// Make sure `baud` is offered and return its index.
    ///
    /// A missing rate goes right before the trailing custom entry.
    pub fn ensure(&mut self, baud: u32) -> usize {
        if let Some(index) = self.index_of(baud) {
            return index;
        }
        let index = self.options.len().saturating_sub(1);
        self.options.insert(index, BaudOption::Rate(baud));
        index
    }

    /// Index to preselect: the last rate that opened a connection, else the default.
    pub fn preferred_index(&mut self, last_success: Option<u32>) -> usize {
        self.ensure(last_success.unwrap_or(DEFAULT_BAUD))
    }
}

/// Validate a baud rate typed by the user.
pub fn parse_custom_baud(raw: &str) -> Result<u32, BaudError> {
    let trimmed = raw.trim();
    let invalid = || BaudError::Invalid {
        input: raw.to_string(),
    };

    if trimmed.is_empty()
        || trimmed.len() > MAX_CUSTOM_BAUD_DIGITS
        || !trimmed.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    match trimmed.parse::<u32>() {
        Ok(baud) if baud > 0 => Ok(baud),
        _ => Err(invalid()),
    }
}

/// Index of the port to preselect.
///
/// Prefers the last port a connection opened on if it is still present.
pub fn preferred_port<S: AsRef<str>>(ports: &[S], last_success: Option<&str>) -> Option<usize> {
    if ports.is_empty() {
        return None;
    }
    last_success
        .and_then(|last| ports.iter().position(|p| p.as_ref() == last))
        .or(Some(0))
}
