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

//! Import merge.

use std::collections::HashSet;

use super::Command;

/// Outcome of merging an import batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Entries inserted into the list.
    pub added: usize,
    /// Unique batch entries whose content was already present.
    pub skipped: usize,
}

/// Merge `batch` into `existing`.
///
/// The batch is first deduplicated by content, keeping first occurrences.
/// New entries end up at the head of `existing` in their batch order;
/// existing entries keep their relative order behind them.
pub fn merge_into(existing: &mut Vec<Command>, batch: Vec<Command>) -> ImportSummary {
    let mut batch_seen = HashSet::new();
    let unique: Vec<Command> = batch
        .into_iter()
        .filter(|c| batch_seen.insert(c.content.clone()))
        .collect();
    let unique_len = unique.len();

    let mut known: HashSet<String> = existing.iter().map(|c| c.content.clone()).collect();
    let mut added = 0;
    // Walking backwards while inserting at 0 preserves the batch order.
    for command in unique.into_iter().rev() {
        if known.insert(command.content.clone()) {
            existing.insert(0, command);
            added += 1;
        }
    }

    ImportSummary {
        added,
        skipped: unique_len - added,
    }
}
