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

//! Saved serial command lists.
//!
//! Hex input helpers, a persisted list of reusable send commands with
//! import/export, and the small connection defaults a serial console needs.

pub mod baud;
pub mod commands;
pub mod config;
pub mod error;
pub mod hex_text;
pub mod serial_log;
pub mod storage;

pub use commands::{Command, CommandStore, Export, ImportSummary};
pub use error::{BaudError, CommandError, HexError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, SerialPreferences};
