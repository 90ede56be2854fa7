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

//! Saved "common commands".
//!
//! A command is a reusable payload with an optional title. Its trimmed
//! content identifies it within a store.

pub mod builtin;
pub mod merge;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use merge::{merge_into, ImportSummary};
pub use store::{CommandStore, Export};

/// Field holding the payload.
const FIELD_CONTENT: &str = "content";
/// Field name used for the payload by older exports.
const FIELD_LEGACY_COMMAND: &str = "command";
const FIELD_TITLE: &str = "title";

/// A single saved command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Payload text, hex digits or raw ASCII depending on the send mode.
    pub content: String,
    /// Optional short label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Command {
    /// Build a command from raw input.
    ///
    /// Both fields are trimmed and a blank title is dropped. Returns `None`
    /// when the content is blank.
    pub fn new(content: &str, title: Option<&str>) -> Option<Self> {
        let content = content.trim();
        if content.is_empty() {
            return None;
        }
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Some(Self {
            content: content.to_string(),
            title,
        })
    }

    /// Title if set, content otherwise.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.content)
    }
}

/// Parse a JSON command list.
///
/// Elements may be bare strings or `{content, title?}` objects; `command`
/// is accepted when `content` is missing. Blank entries and elements of any
/// other shape are skipped. Only a document that isn't a JSON array fails.
pub fn parse_entries(raw: &str) -> Result<Vec<Command>, serde_json::Error> {
    let values: Vec<Value> = serde_json::from_str(raw)?;
    Ok(values.iter().filter_map(parse_entry).collect())
}

fn parse_entry(value: &Value) -> Option<Command> {
    match value {
        Value::String(content) => Command::new(content, None),
        Value::Object(obj) => {
            let content = obj
                .get(FIELD_CONTENT)
                .filter(|v| !v.is_null())
                .or_else(|| obj.get(FIELD_LEGACY_COMMAND))
                .and_then(scalar_text)?;
            let title = obj.get(FIELD_TITLE).and_then(scalar_text);
            Command::new(&content, title.as_deref())
        }
        _ => None,
    }
}

/// Text of a scalar JSON value. Numbers and booleans are taken literally.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Serialize commands as a JSON array of `{content, title?}` records.
pub fn to_json(commands: &[Command]) -> String {
    // Serializing plain strings into a Vec cannot fail.
    serde_json::to_string(commands).unwrap_or_else(|_| "[]".to_string())
}
