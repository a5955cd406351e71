//! EquipParameter row view: a weapon or shield with its skills.

use crate::error::Result;
use crate::registry::{tables, Row};
use crate::views::skill::{strip_namespace, SkillInfo};
use crate::views::text::TextRow;

/// Exported category value marking shield equipment.
pub const SHIELD_CATEGORY: &str = "MS_EQUIP_CATEGORY::SHIELD";

#[derive(Clone, Copy, Debug)]
pub struct EquipParameter<'r>(Row<'r>);

impl<'r> EquipParameter<'r> {
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

    /// Category with the enum namespace stripped, e.g. `SHIELD` or
    /// `RIFLE`.
    pub fn category_kind(&self) -> Result<&'r str> {
        Ok(strip_namespace(self.parts_category()?))
    }

    /// Display name text: shields resolve through the shield-name table,
    /// everything else through the weapon-name table, keyed by `_PartsName`.
    pub fn name_localized(&self) -> Result<TextRow<'r>> {
        let table = if self.parts_category()? == SHIELD_CATEGORY {
            tables::TEXT_SHIELD_NAME
        } else {
            tables::TEXT_WEAPON_NAME
        };
        let row = self.0.registry().table(table)?.by_id(self.parts_name()?)?;
        Ok(TextRow::from_row(row))
    }

    /// Skill detail rows referenced from the embedded `_SkillArray`.
    pub fn skill_details(&self) -> Result<Vec<SkillInfo<'r>>> {
        Ok(self
            .0
            .nested_references("_SkillArray", "_SkillId", tables::SKILL_ID_INFO)?
            .into_iter()
            .map(SkillInfo::from_row)
            .collect())
    }
}
