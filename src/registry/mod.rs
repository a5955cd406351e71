//! Table registry: named, immutable row collections loaded once at startup.
//!
//! The registry maps table names to tables, populated from the declared
//! source list and never mutated afterwards. Derived indices run as part of
//! the load, immediately after their source table registers, so the declared
//! order doubles as the dependency order.

pub mod row;
pub mod sources;

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{DataError, Result};
use crate::index::{MissionRewardIndex, OwnershipIndex, SynthesisIndex};

pub use row::{Row, NONE_SENTINEL};
pub use sources::{tables, IndexKind, SourceDecl, DATA_SOURCES};

/// A named, immutable collection of rows keyed by string id.
pub struct Table {
    name: String,
    rows: serde_json::Map<String, Value>,
}

impl Table {
    /// Build a table from a source document `{"Name": .., "Rows": {..}}`.
    /// The game export wraps each document in a one-element array; both the
    /// wrapped and the bare form are accepted.
    fn from_document(path: &Path, doc: Value) -> Result<Self> {
        let doc = match doc {
            Value::Array(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| DataError::Document {
                    path: path.to_path_buf(),
                    key: "Name",
                })?,
            other => other,
        };

        let Value::Object(mut map) = doc else {
            return Err(DataError::Document {
                path: path.to_path_buf(),
                key: "Name",
            });
        };

        let name = map
            .get("Name")
            .and_then(Value::as_str)
            .ok_or_else(|| DataError::Document {
                path: path.to_path_buf(),
                key: "Name",
            })?
            .to_string();

        let rows = match map.remove("Rows") {
            Some(Value::Object(rows)) => rows,
            _ => {
                return Err(DataError::Document {
                    path: path.to_path_buf(),
                    key: "Rows",
                })
            }
        };

        Ok(Self { name, rows })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A borrowed handle to one table, able to hand out row views that resolve
/// references through the owning registry.
#[derive(Clone, Copy)]
pub struct TableRef<'r> {
    registry: &'r Registry,
    table: &'r Table,
}

impl<'r> TableRef<'r> {
    pub fn name(&self) -> &'r str {
        &self.table.name
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.table.rows.contains_key(id)
    }

    /// Required lookup; absent ids are an error.
    pub fn by_id(&self, id: &str) -> Result<Row<'r>> {
        self.try_by_id(id).ok_or_else(|| DataError::RowNotFound {
            table: self.table.name.clone(),
            id: id.to_string(),
        })
    }

    /// Optional lookup; absent ids yield no value.
    pub fn try_by_id(&self, id: &str) -> Option<Row<'r>> {
        let (key, value) = self.table.rows.get_key_value(id)?;
        Some(Row::new(self.registry, &self.table.name, key, value))
    }

    /// Iterate rows in the source document's stored order.
    pub fn all(&self) -> impl Iterator<Item = Row<'r>> + 'r {
        let registry = self.registry;
        let table = self.table;
        table
            .rows
            .iter()
            .map(move |(key, value)| Row::new(registry, &table.name, key, value))
    }
}

/// The loaded table registry plus the derived indices declared by the
/// source list. Logically immutable after [`Registry::load`] returns; reads
/// are safe from any number of threads.
pub struct Registry {
    tables: IndexMap<String, Table>,
    ownership: Option<OwnershipIndex>,
    synthesis: Option<SynthesisIndex>,
    rewards: Option<MissionRewardIndex>,
}

impl Registry {
    /// Load every declared source below `root`, registering tables and
    /// building declared indices in list order.
    pub fn load(root: &Path, sources: &[SourceDecl]) -> Result<Self> {
        let mut registry = Self::empty();
        for decl in sources {
            let path = root.join(decl.path);
            let text = fs::read_to_string(&path).map_err(|source| DataError::Io {
                path: path.clone(),
                source,
            })?;
            let doc: Value = serde_json::from_str(&text).map_err(|source| DataError::Parse {
                path: path.clone(),
                source,
            })?;
            registry.register(&path, doc, decl.index)?;
        }
        Ok(registry)
    }

    fn empty() -> Self {
        Self {
            tables: IndexMap::new(),
            ownership: None,
            synthesis: None,
            rewards: None,
        }
    }

    fn register(&mut self, path: &Path, doc: Value, index: Option<IndexKind>) -> Result<()> {
        let table = Table::from_document(path, doc)?;
        let name = table.name.clone();
        if self.tables.insert(name.clone(), table).is_some() {
            return Err(DataError::DuplicateTable {
                path: path.to_path_buf(),
                name,
            });
        }
        if let Some(kind) = index {
            self.build_index(kind)?;
        }
        Ok(())
    }

    fn build_index(&mut self, kind: IndexKind) -> Result<()> {
        match kind {
            IndexKind::SuitOwnership => {
                let built = OwnershipIndex::build(self)?;
                self.ownership = Some(built);
            }
            IndexKind::Synthesis => {
                let built = SynthesisIndex::build(self)?;
                self.synthesis = Some(built);
            }
            IndexKind::MissionRewards => {
                let built = MissionRewardIndex::build(self)?;
                self.rewards = Some(built);
            }
        }
        Ok(())
    }

    pub fn table(&self, name: &str) -> Result<TableRef<'_>> {
        let table = self
            .tables
            .get(name)
            .ok_or_else(|| DataError::UnknownTable(name.to_string()))?;
        Ok(TableRef {
            registry: self,
            table,
        })
    }

    /// Registered table names in load order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn ownership(&self) -> Result<&OwnershipIndex> {
        self.ownership
            .as_ref()
            .ok_or(DataError::IndexNotBuilt(tables::MS_LIST))
    }

    pub fn synthesis(&self) -> Result<&SynthesisIndex> {
        self.synthesis
            .as_ref()
            .ok_or(DataError::IndexNotBuilt(tables::DERIVED_SYNTHESIZE))
    }

    pub fn mission_rewards(&self) -> Result<&MissionRewardIndex> {
        self.rewards
            .as_ref()
            .ok_or(DataError::IndexNotBuilt(tables::MISSION_REWARD))
    }
}


#[cfg(test)]
mod tests {
    use super::testutil::{doc, registry_from_docs};
    use super::*;
    use serde_json::json;

    fn sample_registry() -> Registry {
        registry_from_docs(vec![
            (
                doc(
                    "Colors",
                    json!({
                        "red": {"_Hex": "ff0000", "_Next": "green"},
                        "green": {"_Hex": "00ff00", "_Next": "None"},
                    }),
                ),
                None,
            ),
            (
                doc("Empty", json!({})),
                None,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn by_id_exposes_raw_fields() {
        let registry = sample_registry();
        let colors = registry.table("Colors").unwrap();
        let red = colors.by_id("red").unwrap();
        assert_eq!(red.id(), "red");
        assert_eq!(red.str_field("_Hex").unwrap(), "ff0000");
        assert_eq!(colors.try_by_id("red").unwrap(), red);
    }

    #[test]
    fn missing_rows_fail_with_row_not_found() {
        let registry = sample_registry();
        let colors = registry.table("Colors").unwrap();
        assert!(!colors.contains("blue"));
        assert!(colors.try_by_id("blue").is_none());
        match colors.by_id("blue") {
            Err(DataError::RowNotFound { table, id }) => {
                assert_eq!(table, "Colors");
                assert_eq!(id, "blue");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unknown_table_is_an_error() {
        let registry = sample_registry();
        assert!(matches!(
            registry.table("Nope"),
            Err(DataError::UnknownTable(_))
        ));
    }

    #[test]
    fn all_iterates_in_stored_order() {
        let registry = sample_registry();
        let ids: Vec<_> = registry
            .table("Colors")
            .unwrap()
            .all()
            .map(|row| row.id().to_string())
            .collect();
        assert_eq!(ids, ["red", "green"]);
    }

    #[test]
    fn sentinel_reference_resolves_to_no_value() {
        let registry = sample_registry();
        let colors = registry.table("Colors").unwrap();
        let green = colors.by_id("green").unwrap();
        assert!(green.reference("_Next", "Colors").unwrap().is_none());

        let red = colors.by_id("red").unwrap();
        let next = red.reference("_Next", "Colors").unwrap().unwrap();
        assert_eq!(next.id(), "green");
    }

    #[test]
    fn raw_field_read_keeps_sentinel_literal() {
        let registry = sample_registry();
        let green = registry.table("Colors").unwrap().by_id("green").unwrap();
        assert_eq!(green.str_field("_Next").unwrap(), "None");
    }

    #[test]
    fn reference_resolution_is_idempotent() {
        let registry = sample_registry();
        let colors = registry.table("Colors").unwrap();
        let first = colors.by_id("red").unwrap().reference("_Next", "Colors");
        let second = colors.by_id("red").unwrap().reference("_Next", "Colors");
        assert_eq!(first.unwrap(), second.unwrap());
    }

    #[test]
    fn array_wrapped_document_is_accepted() {
        let registry = registry_from_docs(vec![(
            json!([{ "Name": "Wrapped", "Rows": {"a": {}} }]),
            None,
        )])
        .unwrap();
        assert!(registry.table("Wrapped").unwrap().contains("a"));
    }

    #[test]
    fn document_without_rows_is_a_load_error() {
        let result = registry_from_docs(vec![(json!({ "Name": "Broken" }), None)]);
        assert!(matches!(result, Err(DataError::Document { key: "Rows", .. })));
    }

    #[test]
    fn duplicate_table_name_is_a_load_error() {
        let result = registry_from_docs(vec![
            (doc("Twice", json!({})), None),
            (doc("Twice", json!({})), None),
        ]);
        assert!(matches!(result, Err(DataError::DuplicateTable { .. })));
    }

    #[test]
    fn nested_references_skip_absent_ids() {
        let registry = registry_from_docs(vec![
            (
                doc("Skills", json!({"S1": {"_Text": "one"}})),
                None,
            ),
            (
                doc(
                    "Parts",
                    json!({
                        "P1": {"_SkillArray": [
                            {"_SkillId": "S1"},
                            {"_SkillId": "S_missing"},
                        ]},
                    }),
                ),
                None,
            ),
        ])
        .unwrap();
        let part = registry.table("Parts").unwrap().by_id("P1").unwrap();
        let resolved = part.nested_references("_SkillArray", "_SkillId", "Skills").unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id(), "S1");
    }

    #[test]
    fn optional_list_reference_drops_entries_singly() {
        let registry = registry_from_docs(vec![
            (doc("Items", json!({"A": {}, "B": {}}))
            , None),
            (
                doc("Boxes", json!({"box": {"_ItemArray": ["A", "missing", "B"]}})),
                None,
            ),
        ])
        .unwrap();
        let row = registry.table("Boxes").unwrap().by_id("box").unwrap();
        let resolved = row.reference_list_opt("_ItemArray", "Items").unwrap();
        let ids: Vec<_> = resolved.iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["A", "B"]);
    }
}
