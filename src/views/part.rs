//! PartsParameter row view: stats, category and skills of one body part.

use serde_json::Value;

use crate::error::{DataError, Result};
use crate::registry::{tables, Row};
use crate::views::skill::SkillInfo;
use crate::views::text::TextRow;

#[derive(Clone, Copy, Debug)]
pub struct PartParameter<'r>(Row<'r>);

impl<'r> PartParameter<'r> {
    pub fn from_row(row: Row<'r>) -> Self {
        Self(row)
    }

    pub fn row(&self) -> Row<'r> {
        self.0
    }

    pub fn id(&self) -> &'r str {
        self.0.id()
    }

    pub fn parts_name(&self) -> Result<&'r str> {
        self.0.str_field("_PartsName")
    }

    pub fn parts_category(&self) -> Result<&'r str> {
        self.0.str_field("_PartsCategory")
    }

    /// Display name text, keyed by `_PartsName`.
    pub fn name_localized(&self) -> Result<TextRow<'r>> {
        let key = self.parts_name()?;
        let row = self
            .0
            .registry()
            .table(tables::TEXT_PARTS_NAME)?
            .by_id(key)?;
        Ok(TextRow::from_row(row))
    }

    /// Skill detail rows referenced from the embedded `_SkillArray`.
    /// Entries pointing at skills absent from the export are skipped.
    pub fn skill_details(&self) -> Result<Vec<SkillInfo<'r>>> {
        Ok(self
            .0
            .nested_references("_SkillArray", "_SkillId", tables::SKILL_ID_INFO)?
            .into_iter()
            .map(SkillInfo::from_row)
            .collect())
    }

    /// Performance group name from the embedded `_Other` record, e.g.
    /// `HeadParts`.
    pub fn performance_group(&self) -> Result<&'r str> {
        self.0
            .field("_Other")?
            .get("_PerformanceGroupName")
            .and_then(Value::as_str)
            .ok_or_else(|| DataError::FieldShape {
                table: self.0.table_name().to_string(),
                id: self.0.id().to_string(),
                field: "_Other",
                expected: "a record with a performance group name",
            })
    }
}
