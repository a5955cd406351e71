//! Declared data sources for the extracted game tables.
//!
//! The list is ordered: a derived-index builder may read tables registered
//! before it, so sources carrying an index declaration must appear after
//! every table their builder touches (MSList before
//! DerivedSynthesizeParameter, for example).

/// Derived index to build immediately after a source's table registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Suit/part ownership over MSList body slots.
    SuitOwnership,
    /// Part-level synthesis recipes over DerivedSynthesizeParameter.
    Synthesis,
    /// Mission reward grouping and reverse item lookup.
    MissionRewards,
}

/// One declared data source: a file below the data root, plus an optional
/// derived index built from the resulting table.
#[derive(Debug, Clone, Copy)]
pub struct SourceDecl {
    pub path: &'static str,
    pub index: Option<IndexKind>,
}

impl SourceDecl {
    pub const fn table(path: &'static str) -> Self {
        Self { path, index: None }
    }

    pub const fn with_index(path: &'static str, index: IndexKind) -> Self {
        Self {
            path,
            index: Some(index),
        }
    }
}

/// Registered table names. A table registers under the `Name` key of its
/// source document, not under its file name.
pub mod tables {
    pub const MS_LIST: &str = "MSList";
    pub const PARTS_PARAMETER: &str = "PartsParameter";
    pub const EQUIP_PARAMETER: &str = "EquipParameter";
    pub const SKILL_ID_INFO: &str = "SkillIdInfo";
    pub const ITEM_GUNPLA_BOX: &str = "ItemGunplaBox";
    pub const SHOP_ITEM: &str = "ShopItem";
    pub const DERIVED_SYNTHESIZE: &str = "DerivedSynthesizeParameter";
    pub const MISSION_LIST: &str = "MissionListTable";
    pub const MISSION_REWARD: &str = "MissionRewardTable";

    pub const TEXT_MS_NUMBER: &str = "localized_text_ms_number";
    pub const TEXT_PARTS_NAME: &str = "localized_text_parts_name";
    pub const TEXT_PRESET_CHARACTER_NAME: &str = "localized_text_preset_character_name";
    pub const TEXT_WEAPON_NAME: &str = "localized_text_weapon_name";
    pub const TEXT_SHIELD_NAME: &str = "localized_text_shield_name";
    pub const TEXT_BPARTS_NAME: &str = "localized_text_bparts_name";
    pub const TEXT_STORY_TITLE: &str = "localized_text_story_title_name";
    pub const TEXT_SERIES_NAME: &str = "localized_text_series_name";
    pub const TEXT_SKILL_NAME: &str = "localized_text_skill_name";
    pub const TEXT_SKILL_INFO: &str = "localized_text_skill_info";
}

/// All data sources in load order.
pub static DATA_SOURCES: &[SourceDecl] = &[
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_ability_cartridge_name.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_ability_cartridge_info.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_skill_info.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_skill_name.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_ms_number.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_parts_name.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_preset_character_name.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_weapon_name.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_shield_name.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_bparts_name.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_story_title_name.json"),
    SourceDecl::table("GB4/Content/Text/en/Common/localized_text_series_name.json"),
    SourceDecl::table("GB4/Content/Data/MS/AbilityCartridge.json"),
    SourceDecl::table("GB4/Content/Data/MS/AbilityInfo.json"),
    SourceDecl::table("GB4/Content/Data/MS/AbilityPerformance.json"),
    SourceDecl::table("GB4/Content/Data/MS/EquipAttachParameter.json"),
    SourceDecl::table("GB4/Content/Data/MS/EquipParameter.json"),
    SourceDecl::table("GB4/Content/Data/MS/EquipPerformance.json"),
    SourceDecl::with_index("GB4/Content/Data/MS/MSList.json", IndexKind::SuitOwnership),
    SourceDecl::table("GB4/Content/Data/MS/PartsIdList.json"),
    SourceDecl::table("GB4/Content/Data/MS/PartsParameter.json"),
    SourceDecl::with_index(
        "GB4/Content/Data/MS/DerivedSynthesizeParameter.json",
        IndexKind::Synthesis,
    ),
    SourceDecl::table("GB4/Content/Data/Item/ItemGunplaBox.json"),
    SourceDecl::table("GB4/Content/Data/Shop/ShopItem.json"),
    SourceDecl::table("GB4/Content/Data/Skill/SkillIdInfo.json"),
    SourceDecl::table("GB4/Content/Data/Mission/MissionListTable.json"),
    SourceDecl::with_index(
        "GB4/Content/Data/Mission/MissionRewardTable.json",
        IndexKind::MissionRewards,
    ),
];
