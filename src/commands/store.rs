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

//! Persisted common-command list.
//!
//! Every operation reloads the list from the backend, mutates it and writes
//! it back. Nothing is cached between calls, and concurrent writers are
//! last-write-wins.

use tracing::{debug, info, warn};

use super::{merge, parse_entries, to_json, Command, ImportSummary};
use crate::error::CommandError;
use crate::storage::SerialPreferences;

/// Serialized store contents ready to be written to an export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// JSON array of `{content, title?}` records.
    pub json: String,
    /// Number of records in `json`.
    pub count: usize,
}

/// Ordered, content-unique list of saved commands. Newest first.
#[derive(Clone)]
pub struct CommandStore {
    prefs: SerialPreferences,
}

impl CommandStore {
    pub fn new(prefs: SerialPreferences) -> Self {
        Self { prefs }
    }

    /// Load the current list.
    ///
    /// An unparsable stored list is treated as empty. This is intentional:
    /// corrupted local state must never lock the user out of the list, and
    /// the next save overwrites it.
    pub fn load(&self) -> Vec<Command> {
        let raw = self.prefs.common_commands_json();
        match parse_entries(&raw) {
            Ok(commands) => commands,
            Err(e) => {
                warn!("Stored common commands are unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the stored list.
    pub fn save(&self, commands: &[Command]) {
        self.prefs.set_common_commands_json(&to_json(commands));
        debug!("Saved {} common commands", commands.len());
    }

    /// Add a command at the head of the list.
    ///
    /// Returns `Ok(None)` without touching the store when the content is blank.
    pub fn add(&self, content_raw: &str) -> Result<Option<Command>, CommandError> {
        let Some(command) = Command::new(content_raw, None) else {
            return Ok(None);
        };

        let mut commands = self.load();
        if commands.iter().any(|c| c.content == command.content) {
            return Err(CommandError::DuplicateContent);
        }

        commands.insert(0, command.clone());
        self.save(&commands);
        self.prefs.set_common_commands_added(true);
        info!("Added common command '{}'", command.content);
        Ok(Some(command))
    }

    /// Remove the command with this content. Returns whether anything was removed.
    pub fn remove(&self, content: &str) -> bool {
        let content = content.trim();
        let mut commands = self.load();
        let before = commands.len();
        commands.retain(|c| c.content != content);

        let removed = commands.len() != before;
        if removed {
            self.save(&commands);
            info!("Removed common command '{}'", content);
        }
        removed
    }

    /// Replace the command holding `old_content`, keeping its position.
    pub fn edit(
        &self,
        old_content: &str,
        new_title: Option<&str>,
        new_content: &str,
    ) -> Result<Command, CommandError> {
        let replacement =
            Command::new(new_content, new_title).ok_or(CommandError::ContentRequired)?;
        let old_content = old_content.trim();

        let mut commands = self.load();
        let index = commands
            .iter()
            .position(|c| c.content == old_content)
            .ok_or(CommandError::NotFound)?;

        if replacement.content != old_content
            && commands.iter().any(|c| c.content == replacement.content)
        {
            return Err(CommandError::DuplicateContent);
        }

        commands[index] = replacement.clone();
        self.save(&commands);
        info!("Edited common command '{}'", replacement.content);
        Ok(replacement)
    }

    /// Drop every saved command.
    pub fn clear_all(&self) {
        self.prefs.clear_common_commands();
        info!("Cleared common commands");
    }

    /// Merge an imported JSON command list into the store.
    ///
    /// Nothing is applied when the text isn't a command list.
    pub fn import(&self, text: &str) -> Result<ImportSummary, CommandError> {
        let batch = parse_entries(text)?;

        let mut commands = self.load();
        let summary = merge::merge_into(&mut commands, batch);
        if summary.added > 0 {
            self.save(&commands);
            self.prefs.set_common_commands_added(true);
        }
        info!(
            "Imported common commands: {} added, {} skipped",
            summary.added, summary.skipped
        );
        Ok(summary)
    }

    /// Serialize the whole store for an export file.
    pub fn export(&self) -> Export {
        let commands = self.load();
        Export {
            json: to_json(&commands),
            count: commands.len(),
        }
    }

    /// Whether a command was ever added or imported.
    pub fn ever_added(&self) -> bool {
        self.prefs.common_commands_added()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn store() -> CommandStore {
        CommandStore::new(SerialPreferences::new(Arc::new(MemoryStore::new())))
    }

    fn contents(store: &CommandStore) -> Vec<String> {
        store.load().into_iter().map(|c| c.content).collect()
    }

    #[test]
    fn test_load_empty_by_default() {
        assert!(store().load().is_empty());
    }

    #[test]
    fn test_load_corrupt_data_is_empty() {
        let store = store();
        store.prefs.set_common_commands_json("{broken");
        assert!(store.load().is_empty());

        store.prefs.set_common_commands_json(r#"{"content": "AA"}"#);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_tolerates_legacy_shapes() {
        let store = store();
        store
            .prefs
            .set_common_commands_json(r#"[" AA ", {"command": "BB", "title": " t "}, {"content": ""}]"#);

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], Command::new("AA", None).unwrap());
        assert_eq!(loaded[1], Command::new("BB", Some("t")).unwrap());
    }

    #[test]
    fn test_save_load_round_trip() {
        let store = store();
        let commands = vec![
            Command::new("AA", Some("first")).unwrap(),
            Command::new("BB", None).unwrap(),
        ];
        store.save(&commands);
        assert_eq!(store.load(), commands);
    }

    #[test]
    fn test_add_inserts_at_head() {
        let store = store();
        assert!(!store.ever_added());

        store.add("AA").unwrap();
        let added = store.add("  BB  ").unwrap();

        assert_eq!(added, Command::new("BB", None));
        assert_eq!(contents(&store), vec!["BB", "AA"]);
        assert!(store.ever_added());
    }

    #[test]
    fn test_add_blank_is_noop() {
        let store = store();
        assert_eq!(store.add("   "), Ok(None));
        assert!(store.load().is_empty());
        assert!(!store.ever_added());
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let store = store();
        store.add("AA").unwrap();
        assert_eq!(store.add(" AA "), Err(CommandError::DuplicateContent));
        assert_eq!(contents(&store), vec!["AA"]);
    }

    #[test]
    fn test_remove() {
        let store = store();
        store.add("AA").unwrap();
        store.add("BB").unwrap();

        assert!(store.remove("AA"));
        assert_eq!(contents(&store), vec!["BB"]);
        assert!(!store.remove("AA"));
        assert_eq!(contents(&store), vec!["BB"]);
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let store = store();
        store.add("CC").unwrap();
        store.add("BB").unwrap();
        store.add("AA").unwrap();

        let edited = store.edit("BB", Some(" middle "), " B2 ").unwrap();
        assert_eq!(edited, Command::new("B2", Some("middle")).unwrap());
        assert_eq!(contents(&store), vec!["AA", "B2", "CC"]);
        assert_eq!(store.load()[1].title.as_deref(), Some("middle"));
    }

    #[test]
    fn test_edit_title_only() {
        let store = store();
        store.add("AA").unwrap();

        store.edit("AA", Some("named"), "AA").unwrap();
        store.edit("AA", Some("  "), "AA").unwrap();
        assert_eq!(store.load(), vec![Command::new("AA", None).unwrap()]);
    }

    #[test]
    fn test_edit_blank_content_required() {
        let store = store();
        store.add("X").unwrap();

        assert_eq!(
            store.edit("X", None, "   "),
            Err(CommandError::ContentRequired)
        );
        assert_eq!(contents(&store), vec!["X"]);
    }

    #[test]
    fn test_edit_missing_target() {
        let store = store();
        store.add("AA").unwrap();
        assert_eq!(store.edit("ZZ", None, "BB"), Err(CommandError::NotFound));
        assert_eq!(contents(&store), vec!["AA"]);
    }

    #[test]
    fn test_edit_collision_rejected() {
        let store = store();
        store.add("AA").unwrap();
        store.add("BB").unwrap();

        assert_eq!(
            store.edit("BB", Some("t"), "AA"),
            Err(CommandError::DuplicateContent)
        );
        assert_eq!(contents(&store), vec!["BB", "AA"]);
        assert_eq!(store.load()[0].title, None);
    }

    #[test]
    fn test_clear_all() {
        let store = store();
        store.add("AA").unwrap();
        store.clear_all();
        assert!(store.load().is_empty());
        assert!(store.ever_added());
    }

    #[test]
    fn test_clear_all_removes_stored_key() {
        let backend = Arc::new(MemoryStore::new());
        let store = CommandStore::new(SerialPreferences::new(backend.clone()));
        store.add("AA").unwrap();
        assert!(backend.get("common_commands").is_some());

        store.clear_all();
        assert_eq!(backend.get("common_commands"), None);
        assert!(store.load().is_empty());

        store.add("BB").unwrap();
        assert_eq!(contents(&store), vec!["BB"]);
    }

    #[test]
    fn test_import_merges_ahead_of_existing() {
        let store = store();
        store.save(&[
            Command::new("A", None).unwrap(),
            Command::new("B", None).unwrap(),
        ]);

        let summary = store.import(r#"["B", "C", "C", "D"]"#).unwrap();
        assert_eq!(summary, ImportSummary { added: 2, skipped: 1 });
        assert_eq!(contents(&store), vec!["C", "D", "A", "B"]);
        assert!(store.ever_added());
    }

    #[test]
    fn test_import_nothing_new_leaves_flag() {
        let store = store();
        store.save(&[Command::new("A", None).unwrap()]);

        let summary = store.import(r#"[{"content": "A", "title": "dup"}]"#).unwrap();
        assert_eq!(summary, ImportSummary { added: 0, skipped: 1 });
        assert_eq!(store.load(), vec![Command::new("A", None).unwrap()]);
        assert!(!store.ever_added());
    }

    #[test]
    fn test_import_malformed_applies_nothing() {
        let store = store();
        store.add("A").unwrap();

        let err = store.import("{\"content\": \"B\"}").unwrap_err();
        assert!(matches!(err, CommandError::MalformedImport { .. }));
        assert_eq!(contents(&store), vec!["A"]);
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let source = store();
        source.add("AA").unwrap();
        source.add("BB").unwrap();
        source.edit("BB", Some("second"), "BB").unwrap();

        let export = source.export();
        assert_eq!(export.count, 2);
        assert_eq!(
            export.json,
            r#"[{"content":"BB","title":"second"},{"content":"AA"}]"#
        );

        let target = store();
        let summary = target.import(&export.json).unwrap();
        assert_eq!(summary, ImportSummary { added: 2, skipped: 0 });
        assert_eq!(target.load(), source.load());
    }

    fn assert_unique(store: &CommandStore) {
        let mut seen = std::collections::HashSet::new();
        for command in store.load() {
            assert!(seen.insert(command.content.clone()), "duplicate {}", command.content);
        }
    }

    #[test]
    fn test_uniqueness_holds_across_operations() {
        let store = store();
        for content in ["A", " A", "B", "A ", "C"] {
            let _ = store.add(content);
        }
        let _ = store.edit("C", None, "B");
        let _ = store.edit("C", None, "D");
        let _ = store.import(r#"["D", "E", " E ", "A"]"#);
        store.remove("B");
        let _ = store.add("B");

        assert_unique(&store);
        assert_eq!(contents(&store), vec!["B", "E", "D", "A"]);
    }

    #[test]
    fn test_edit_trimming_into_existing_rejected() {
        let store = store();
        store.add("A").unwrap();
        store.add("B").unwrap();

        assert_eq!(store.edit("A", None, " B "), Err(CommandError::DuplicateContent));
        assert_eq!(store.edit(" A ", None, "B\t"), Err(CommandError::DuplicateContent));
        assert_unique(&store);
        assert_eq!(contents(&store), vec!["B", "A"]);

        // Trimming back onto its own content is a title edit.
        let edited = store.edit(" A ", Some("first"), "  A  ").unwrap();
        assert_eq!(edited, Command::new("A", Some("first")).unwrap());
        assert_unique(&store);
        assert_eq!(contents(&store), vec!["B", "A"]);
    }

    #[test]
    fn test_uniqueness_import_then_edit_and_remove() {
        let store = store();
        let summary = store.import(r#"["X", " X", "Y"]"#).unwrap();
        assert_eq!(summary, ImportSummary { added: 2, skipped: 0 });
        assert_unique(&store);

        assert_eq!(store.add(" Y "), Err(CommandError::DuplicateContent));
        assert_eq!(store.edit("X", None, "Y "), Err(CommandError::DuplicateContent));
        assert!(store.remove(" Y "));
        store.edit("X", None, " Y").unwrap();
        assert_unique(&store);
        assert_eq!(contents(&store), vec!["Y"]);

        let summary = store.import(r#"["Y", "Z"]"#).unwrap();
        assert_eq!(summary, ImportSummary { added: 1, skipped: 1 });
        assert_unique(&store);
        assert_eq!(contents(&store), vec!["Z", "Y"]);
    }

    #[test]
    fn test_uniqueness_after_clear_and_reimport() {
        let store = store();
        for content in ["P", "Q", "R"] {
            store.add(content).unwrap();
        }
        let export = store.export();

        store.clear_all();
        let summary = store
            .import(r#"[" Q ", "Q", {"content": "Q", "title": "t"}]"#)
            .unwrap();
        assert_eq!(summary, ImportSummary { added: 1, skipped: 0 });
        assert_eq!(store.load(), vec![Command::new("Q", None).unwrap()]);

        let summary = store.import(&export.json).unwrap();
        assert_eq!(summary, ImportSummary { added: 2, skipped: 1 });
        assert_unique(&store);
        assert_eq!(contents(&store), vec!["R", "P", "Q"]);

        store.edit("R", None, "P").unwrap_err();
        store.edit("Q", None, " S ").unwrap();
        assert_eq!(store.add("S"), Err(CommandError::DuplicateContent));
        assert_unique(&store);
        assert_eq!(contents(&store), vec!["R", "P", "S"]);
    }
}
