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

//! Typed preferences on top of a [`KeyValueStore`].
//!
//! Writes are fire-and-forget: a failing backend is logged and the value is
//! dropped, so a broken disk never blocks the serial session.

use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use super::KeyValueStore;

const KEY_LOG_AUTO_SCROLL: &str = "pref_log_auto_scroll";
const KEY_LOG_SHOW_TIME: &str = "pref_log_show_time";
const KEY_LOG_SHOW_TITLE: &str = "pref_log_show_title";
const KEY_INPUT_MODE_HEX: &str = "pref_input_mode_hex";
const KEY_LAST_SUCCESS_BAUD: &str = "last_success_baud";
const KEY_LAST_SUCCESS_PORT: &str = "last_success_port";
const KEY_COMMON_COMMANDS: &str = "common_commands";
const KEY_COMMON_COMMANDS_ADDED: &str = "common_commands_added";

/// Stored command list when nothing was saved yet.
pub const DEFAULT_COMMON_COMMANDS_JSON: &str = "[]";

/// Serial session preferences.
#[derive(Clone)]
pub struct SerialPreferences {
    backend: Arc<dyn KeyValueStore>,
}

impl SerialPreferences {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.backend
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    fn put(&self, key: &str, value: Value) {
        if let Err(e) = self.backend.put(key, value) {
            warn!("Failed to persist preference '{}': {:#}", key, e);
        }
    }

    pub fn log_auto_scroll(&self) -> bool {
        self.get_bool(KEY_LOG_AUTO_SCROLL, true)
    }

    pub fn set_log_auto_scroll(&self, enabled: bool) {
        self.put(KEY_LOG_AUTO_SCROLL, Value::Bool(enabled));
    }

    pub fn log_show_time(&self) -> bool {
        self.get_bool(KEY_LOG_SHOW_TIME, true)
    }

    pub fn set_log_show_time(&self, enabled: bool) {
        self.put(KEY_LOG_SHOW_TIME, Value::Bool(enabled));
    }

    pub fn log_show_title(&self) -> bool {
        self.get_bool(KEY_LOG_SHOW_TITLE, true)
    }

    pub fn set_log_show_title(&self, enabled: bool) {
        self.put(KEY_LOG_SHOW_TITLE, Value::Bool(enabled));
    }

    pub fn input_mode_hex(&self) -> bool {
        self.get_bool(KEY_INPUT_MODE_HEX, true)
    }

    pub fn set_input_mode_hex(&self, is_hex: bool) {
        self.put(KEY_INPUT_MODE_HEX, Value::Bool(is_hex));
    }

    /// Last baud rate a connection opened with. Non-positive values count as unset.
    pub fn last_successful_baud(&self) -> Option<u32> {
        self.backend
            .get(KEY_LAST_SUCCESS_BAUD)
            .and_then(|v| v.as_u64())
            .filter(|&baud| baud > 0)
            .and_then(|baud| u32::try_from(baud).ok())
    }

    pub fn set_last_successful_baud(&self, baud: u32) {
        self.put(KEY_LAST_SUCCESS_BAUD, Value::from(baud));
    }

    /// Last port a connection opened on. Blank values count as unset.
    pub fn last_successful_port(&self) -> Option<String> {
        self.backend
            .get(KEY_LAST_SUCCESS_PORT)
            .and_then(|v| v.as_str().map(str::to_string))
            .filter(|port| !port.trim().is_empty())
    }

    pub fn set_last_successful_port(&self, port: &str) {
        self.put(KEY_LAST_SUCCESS_PORT, Value::String(port.to_string()));
    }

    /// Raw serialized command list.
    pub fn common_commands_json(&self) -> String {
        self.backend
            .get(KEY_COMMON_COMMANDS)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_COMMON_COMMANDS_JSON.to_string())
    }

    pub fn set_common_commands_json(&self, raw: &str) {
        self.put(KEY_COMMON_COMMANDS, Value::String(raw.to_string()));
    }

    /// Forget the stored command list so it reads back as the empty default.
    pub fn clear_common_commands(&self) {
        if let Err(e) = self.backend.remove(KEY_COMMON_COMMANDS) {
            warn!("Failed to clear preference '{}': {:#}", KEY_COMMON_COMMANDS, e);
        }
    }

    /// Whether a command was ever added. Only drives empty-state wording.
    pub fn common_commands_added(&self) -> bool {
        self.get_bool(KEY_COMMON_COMMANDS_ADDED, false)
    }

    pub fn set_common_commands_added(&self, added: bool) {
        self.put(KEY_COMMON_COMMANDS_ADDED, Value::Bool(added));
    }
}
