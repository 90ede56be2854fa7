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

//! Bundled example command lists.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

const EXTENSIONS: &[&str] = &["txt", "json"];

/// Lists compiled into the binary so they are available from any working directory.
pub const EMBEDDED: &[(&str, &str)] = &[
    (
        "at_commands.txt",
        include_str!("../../assets/common_commands/at_commands.txt"),
    ),
    (
        "modbus_rtu.json",
        include_str!("../../assets/common_commands/modbus_rtu.json"),
    ),
];

fn is_command_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// List command files directly under `dir`, sorted by file name.
///
/// A missing or unreadable directory yields an empty list.
pub fn list(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("No built-in command lists in {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_command_file(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}

/// Find a bundled list by file name.
pub fn find(dir: &Path, name: &str) -> Option<PathBuf> {
    list(dir)
        .into_iter()
        .find(|path| path.file_name().and_then(|n| n.to_str()) == Some(name))
}

/// Read a command list as UTF-8 text.
pub fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
}

/// Names of every available list, sorted.
///
/// Files under `dir` come first in priority; embedded lists fill in the
/// names no file provides.
pub fn names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = list(dir)
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect();
    for (name, _) in EMBEDDED {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names.sort();
    names
}

/// Text of the list called `name`, from `dir` if present there, else embedded.
pub fn load(dir: &Path, name: &str) -> Result<Option<String>> {
    if let Some(path) = find(dir, name) {
        return read(&path).map(Some);
    }
    Ok(EMBEDDED
        .iter()
        .find(|(embedded, _)| *embedded == name)
        .map(|(_, text)| text.to_string()))
}
