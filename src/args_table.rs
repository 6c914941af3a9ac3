//! Row-based editing model for a module's `args` object
//!
//! Rows keep a stable id while the user edits them, so removing one row never
//! disturbs the others. The table is only reloaded from the document when the
//! session's reload generation moves on.

use serde_json::Value;

use crate::document::ConfigMap;
use crate::document::codec::{parse_arg_value, value_to_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgRow {
    pub id: u64,
    pub parameter: String,
    pub value: String,
}

/// Editable column of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Parameter,
    Value,
}

#[derive(Debug, Clone, Default)]
pub struct ArgsTable {
    rows: Vec<ArgRow>,
    next_id: u64,
    generation: Option<u64>,
}

impl ArgsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all rows with one row per key, ids assigned from zero
    pub fn load(&mut self, args: &ConfigMap) {
        self.rows = args
            .iter()
            .zip(0u64..)
            .map(|((key, value), id)| ArgRow {
                id,
                parameter: key.clone(),
                value: value_to_text(value),
            })
            .collect();
        self.next_id = self.rows.len() as u64;
    }

    /// Reload from `args` if `generation` differs from the one captured last
    pub fn sync(&mut self, generation: u64, args: &ConfigMap) -> bool {
        if self.generation == Some(generation) {
            return false;
        }
        self.load(args);
        self.generation = Some(generation);
        true
    }

    pub fn rows(&self) -> &[ArgRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append an empty row and return its id
    pub fn add_row(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.push(ArgRow {
            id,
            parameter: String::new(),
            value: String::new(),
        });
        id
    }

    pub fn remove_row(&mut self, id: u64) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    pub fn edit(&mut self, id: u64, field: RowField, text: &str) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id == id) else {
            return false;
        };
        match field {
            RowField::Parameter => row.parameter = text.to_string(),
            RowField::Value => row.value = text.to_string(),
        }
        true
    }

    /// Build the args object; blank names are skipped and later duplicates win
    pub fn materialize(&self) -> ConfigMap {
        let mut args = ConfigMap::new();
        for row in &self.rows {
            let key = row.parameter.trim();
            if key.is_empty() {
                continue;
            }
            let value: Value = parse_arg_value(&row.value);
            args.insert(key.to_string(), value);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ConfigMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_load_assigns_ids_in_order() {
        let mut table = ArgsTable::new();
        table.load(&args(json!({ "model": "gpt-4o", "seed": 133, "tags": ["a"] })));
        let rows = table.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].id, rows[0].parameter.as_str(), rows[0].value.as_str()), (0, "model", "gpt-4o"));
        assert_eq!((rows[1].id, rows[1].value.as_str()), (1, "133"));
        assert_eq!((rows[2].id, rows[2].value.as_str()), (2, "[\"a\"]"));
    }

    #[test]
    fn test_add_and_remove_keep_identities() {
        let mut table = ArgsTable::new();
        table.load(&args(json!({ "a": "1", "b": "2" })));
        let added = table.add_row();
        assert_eq!(added, 2);

        assert!(table.remove_row(1));
        assert!(!table.remove_row(1));
        let ids: Vec<u64> = table.rows().iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![0, 2]);

        assert_eq!(table.add_row(), 3);
    }

    #[test]
    fn test_edit_targets_row_by_id() {
        let mut table = ArgsTable::new();
        let id = table.add_row();
        assert!(table.edit(id, RowField::Parameter, "max_results"));
        assert!(table.edit(id, RowField::Value, "20"));
        assert!(!table.edit(99, RowField::Value, "x"));
        assert_eq!(table.materialize(), args(json!({ "max_results": "20" })));
    }

    #[test]
    fn test_materialize_skips_blank_names() {
        let mut table = ArgsTable::new();
        let blank = table.add_row();
        table.edit(blank, RowField::Value, "5");
        let named = table.add_row();
        table.edit(named, RowField::Parameter, "k");
        table.edit(named, RowField::Value, "v");
        assert_eq!(table.materialize(), args(json!({ "k": "v" })));
    }

    #[test]
    fn test_materialize_later_duplicates_win() {
        let mut table = ArgsTable::new();
        for (name, value) in [(" seed ", "1"), ("seed", "2")] {
            let id = table.add_row();
            table.edit(id, RowField::Parameter, name);
            table.edit(id, RowField::Value, value);
        }
        assert_eq!(table.materialize(), args(json!({ "seed": "2" })));
    }

    #[test]
    fn test_materialize_decodes_json_shaped_text() {
        let mut table = ArgsTable::new();
        for (name, value) in [("list", "[1, 2, 3]"), ("broken", "not json but has { brace"), ("flag", "false")] {
            let id = table.add_row();
            table.edit(id, RowField::Parameter, name);
            table.edit(id, RowField::Value, value);
        }
        let materialized = table.materialize();
        assert_eq!(materialized["list"], json!([1, 2, 3]));
        assert_eq!(materialized["broken"], json!("not json but has { brace"));
        assert_eq!(materialized["flag"], json!("false"));
    }

    #[test]
    fn test_sync_preserves_edits_within_generation() {
        let mut table = ArgsTable::new();
        let original = args(json!({ "model": "a" }));
        assert!(table.sync(0, &original));
        table.edit(0, RowField::Value, "edited");

        let changed_elsewhere = args(json!({ "model": "b" }));
        assert!(!table.sync(0, &changed_elsewhere));
        assert_eq!(table.rows()[0].value, "edited");

        assert!(table.sync(1, &changed_elsewhere));
        assert_eq!(table.rows()[0].value, "b");
    }
}
