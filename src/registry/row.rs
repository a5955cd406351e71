//! Read-only row views and lazy cross-table reference resolution.

use serde_json::Value;

use crate::error::{DataError, Result};
use crate::registry::Registry;

/// Raw value marking an empty reference slot in the exported tables.
pub const NONE_SENTINEL: &str = "None";

/// A read-only view over one raw record.
///
/// A row binds the record to the id it was keyed under and to the registry
/// it came from, so declared references can be resolved on demand. Rows are
/// cheap, stateless wrappers: re-fetching the same id yields a new view over
/// the same underlying record.
#[derive(Clone, Copy)]
pub struct Row<'r> {
    registry: &'r Registry,
    table: &'r str,
    id: &'r str,
    data: &'r Value,
}

impl<'r> Row<'r> {
    pub(crate) fn new(registry: &'r Registry, table: &'r str, id: &'r str, data: &'r Value) -> Self {
        Self {
            registry,
            table,
            id,
            data,
        }
    }

    pub fn id(&self) -> &'r str {
        self.id
    }

    pub fn table_name(&self) -> &'r str {
        self.table
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// The raw record as stored.
    pub fn record(&self) -> &'r Value {
        self.data
    }

    /// Raw field access. Returns the stored value unmodified; the `"None"`
    /// sentinel is only normalized at declared reference resolution.
    pub fn raw(&self, key: &str) -> Option<&'r Value> {
        self.data.get(key)
    }

    /// Raw field access for a declared field; absent keys are an error.
    pub fn field(&self, key: &'static str) -> Result<&'r Value> {
        self.raw(key).ok_or_else(|| DataError::FieldNotFound {
            table: self.table.to_string(),
            id: self.id.to_string(),
            field: key,
        })
    }

    pub fn str_field(&self, key: &'static str) -> Result<&'r str> {
        self.field(key)?
            .as_str()
            .ok_or_else(|| self.shape_error(key, "a string"))
    }

    pub fn list_field(&self, key: &'static str) -> Result<&'r [Value]> {
        self.field(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.shape_error(key, "a list"))
    }

    fn shape_error(&self, field: &'static str, expected: &'static str) -> DataError {
        DataError::FieldShape {
            table: self.table.to_string(),
            id: self.id.to_string(),
            field,
            expected,
        }
    }

    /// Resolve a declared single reference: the field holds one id into
    /// `table`, or the `"None"` sentinel for no value. A missing target row
    /// is an error.
    pub fn reference(&self, field: &'static str, table: &str) -> Result<Option<Row<'r>>> {
        match self.reference_id(field)? {
            Some(id) => Ok(Some(self.registry.table(table)?.by_id(id)?)),
            None => Ok(None),
        }
    }

    /// Resolve a declared optional single reference: like [`Row::reference`]
    /// but a missing target row yields no value instead of failing.
    pub fn reference_opt(&self, field: &'static str, table: &str) -> Result<Option<Row<'r>>> {
        match self.reference_id(field)? {
            Some(id) => Ok(self.registry.table(table)?.try_by_id(id)),
            None => Ok(None),
        }
    }

    /// Resolve a declared list reference: the field holds a list of ids into
    /// `table`. Every entry must resolve.
    pub fn reference_list(&self, field: &'static str, table: &str) -> Result<Vec<Row<'r>>> {
        let target = self.registry.table(table)?;
        self.reference_id_list(field)?
            .into_iter()
            .map(|id| target.by_id(id))
            .collect()
    }

    /// Resolve a declared optional list reference: unresolvable entries are
    /// dropped one at a time rather than failing the whole list.
    pub fn reference_list_opt(&self, field: &'static str, table: &str) -> Result<Vec<Row<'r>>> {
        let target = self.registry.table(table)?;
        Ok(self
            .reference_id_list(field)?
            .into_iter()
            .filter_map(|id| target.try_by_id(id))
            .collect())
    }

    /// Resolve a reference keyed by this row's own id.
    pub fn id_reference(&self, table: &str) -> Result<Row<'r>> {
        self.registry.table(table)?.by_id(self.id)
    }

    /// Resolve an optional reference keyed by this row's own id.
    pub fn id_reference_opt(&self, table: &str) -> Result<Option<Row<'r>>> {
        Ok(self.registry.table(table)?.try_by_id(self.id))
    }

    /// Resolve a nested array-of-objects reference: `field` holds a list of
    /// embedded records, `item_key` names the id inside each record, and the
    /// id is looked up in `table`. Embedded records whose id is absent from
    /// the target table are skipped; trimmed exports legitimately reference
    /// ids that were not carried over.
    pub fn nested_references(
        &self,
        field: &'static str,
        item_key: &'static str,
        table: &str,
    ) -> Result<Vec<Row<'r>>> {
        let target = self.registry.table(table)?;
        let mut rows = Vec::new();
        for item in self.list_field(field)? {
            let id = item
                .get(item_key)
                .and_then(Value::as_str)
                .ok_or_else(|| self.shape_error(field, "a list of records with a string id"))?;
            if let Some(row) = target.try_by_id(id) {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    /// Read a reference field as `Some(id)`, or `None` for the sentinel.
    fn reference_id(&self, field: &'static str) -> Result<Option<&'r str>> {
        let value = self
            .field(field)?
            .as_str()
            .ok_or_else(|| self.shape_error(field, "a string id"))?;
        if value == NONE_SENTINEL {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }

    fn reference_id_list(&self, field: &'static str) -> Result<Vec<&'r str>> {
        self.list_field(field)?
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| self.shape_error(field, "a list of string ids"))
            })
            .collect()
    }
}

impl PartialEq for Row<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table && self.id == other.id && self.data == other.data
    }
}

impl std::fmt::Debug for Row<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Row")
            .field("table", &self.table)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
