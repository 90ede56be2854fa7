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

//! Serial traffic log records.

use chrono::{DateTime, Local};

use crate::hex_text::{self, SendMode};

/// Time stamp format of log lines.
pub const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Traffic direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Tx,
    Rx,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Tx => "TX",
            Direction::Rx => "RX",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Tx => "▶",
            Direction::Rx => "◀",
        }
    }
}

/// One logged chunk of serial traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialLog {
    pub time: String,
    pub direction: Direction,
    pub content: String,
    /// Title of the saved command that produced this line, if any.
    pub title: Option<String>,
    pub is_hex: bool,
}

impl SerialLog {
    pub fn new(time: DateTime<Local>, direction: Direction, content: impl Into<String>) -> Self {
        Self {
            time: time.format(TIME_FORMAT).to_string(),
            direction,
            content: content.into(),
            title: None,
            is_hex: false,
        }
    }

    /// Log a payload that was sent. Hex input is shown regrouped in pairs.
    pub fn sent(input: &str, mode: SendMode, title: Option<&str>) -> Self {
        let content = match mode {
            SendMode::Hex => hex_text::format_hex(input),
            SendMode::Ascii => input.to_string(),
        };
        let mut log = Self::new(Local::now(), Direction::Tx, content);
        log.title = title.map(str::to_string);
        log.is_hex = mode.is_hex();
        log
    }

    /// Log received bytes as spaced hex or lossy UTF-8 text.
    pub fn received(data: &[u8], mode: SendMode) -> Self {
        let content = match mode {
            SendMode::Hex => hex_text::encode_bytes_spaced(data),
            SendMode::Ascii => String::from_utf8_lossy(data).into_owned(),
        };
        let mut log = Self::new(Local::now(), Direction::Rx, content);
        log.is_hex = mode.is_hex();
        log
    }

    /// `[time] ▶ TX: title: content` with both time and title shown.
    pub fn format_line(&self) -> String {
        self.format_line_with(true, true)
    }

    /// Format with the log display preferences applied.
    ///
    /// The time prefix is dropped when `show_time` is off. A non-blank title
    /// is put in front of the content when `show_title` is on.
    pub fn format_line_with(&self, show_time: bool, show_title: bool) -> String {
        let title = self
            .title
            .as_deref()
            .filter(|t| show_title && !t.trim().is_empty());
        let content = match title {
            Some(title) => format!("{}: {}", title, self.content),
            None => self.content.clone(),
        };

        let prefix = format!("{} {}: ", self.direction.arrow(), self.direction.as_str());
        if show_time {
            format!("[{}] {}{}", self.time, prefix, content)
        } else {
            format!("{}{}", prefix, content)
        }
    }
}
