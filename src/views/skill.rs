//! SkillIdInfo row view: one skill's category, awaken flag and text.

use serde_json::Value;

use crate::error::Result;
use crate::registry::{tables, Row, NONE_SENTINEL};
use crate::views::text::TextRow;

/// Strip the `ENUM_NAMESPACE::` qualifier off an exported enum value.
pub fn strip_namespace(value: &str) -> &str {
    match value.split_once("::") {
        Some((_, kind)) => kind,
        None => value,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SkillInfo<'r>(Row<'r>);

impl<'r> SkillInfo<'r> {
    pub fn from_row(row: Row<'r>) -> Self {
        Self(row)
    }

    pub fn row(&self) -> Row<'r> {
        self.0
    }

    pub fn id(&self) -> &'r str {
        self.0.id()
    }

    pub fn ability_cartridge_category(&self) -> Result<&'r str> {
        self.0.str_field("_AbilityCartridgeCategory")
    }

    /// Category with the enum namespace stripped, e.g. `EX_ATTACK`.
    pub fn ability_type(&self) -> Result<&'r str> {
        Ok(strip_namespace(self.ability_cartridge_category()?))
    }

    pub fn hyper_trance_id(&self) -> Result<&'r str> {
        self.0.str_field("_HyperTranceId")
    }

    /// Whether the skill is an awakening skill (it carries a hyper trance
    /// id).
    pub fn is_awaken(&self) -> Result<bool> {
        Ok(self.hyper_trance_id()? != NONE_SENTINEL)
    }

    /// Skill name text, keyed by the skill's own id.
    pub fn name_localized(&self) -> Result<TextRow<'r>> {
        Ok(TextRow::from_row(self.0.id_reference(tables::TEXT_SKILL_NAME)?))
    }

    /// Skill description text, keyed by the skill's own id.
    pub fn info_localized(&self) -> Result<TextRow<'r>> {
        Ok(TextRow::from_row(self.0.id_reference(tables::TEXT_SKILL_INFO)?))
    }

    /// Display name routed through the first `_UiInfoArray` entry's text id.
    /// Absent array, empty array or an unresolvable text id all yield no
    /// value; equipment skills frequently lack UI text in trimmed exports.
    pub fn ui_name_localized(&self) -> Result<Option<&'r str>> {
        self.ui_text(tables::TEXT_SKILL_NAME)
    }

    /// Description routed through the first `_UiInfoArray` entry's text id.
    pub fn ui_info_localized(&self) -> Result<Option<&'r str>> {
        self.ui_text(tables::TEXT_SKILL_INFO)
    }

    fn ui_text(&self, table: &str) -> Result<Option<&'r str>> {
        let Some(items) = self.0.raw("_UiInfoArray").and_then(Value::as_array) else {
            return Ok(None);
        };
        let Some(text_id) = items
            .first()
            .and_then(|item| item.get("_TextId"))
            .and_then(Value::as_str)
        else {
            return Ok(None);
        };
        match self.0.registry().table(table)?.try_by_id(text_id) {
            Some(row) => Ok(Some(TextRow::from_row(row).text()?)),
            None => Ok(None),
        }
    }
}
