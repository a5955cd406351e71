//! Integration tests over a synthesized data directory.
//!
//! These tests:
//! 1. Write a small but complete fixture export to a temp directory
//! 2. Load a registry through the real loader, indices included
//! 3. Check lookup, index and page-rendering behavior end to end

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use gb4_wiki_gen::error::DataError;
use gb4_wiki_gen::registry::{tables, IndexKind, Registry, SourceDecl};
use gb4_wiki_gen::render::{equip_page, kit_page, mission_page, recipes, suit_page};
use gb4_wiki_gen::views::{BodySlot, Suit};

// =============================================================================
// Fixture
// =============================================================================

const FIXTURE_SOURCES: &[SourceDecl] = &[
    SourceDecl::table("localized_text_preset_character_name.json"),
    SourceDecl::table("localized_text_ms_number.json"),
    SourceDecl::table("localized_text_parts_name.json"),
    SourceDecl::table("localized_text_weapon_name.json"),
    SourceDecl::table("localized_text_shield_name.json"),
    SourceDecl::table("localized_text_bparts_name.json"),
    SourceDecl::table("localized_text_story_title_name.json"),
    SourceDecl::table("localized_text_series_name.json"),
    SourceDecl::table("localized_text_skill_name.json"),
    SourceDecl::table("localized_text_skill_info.json"),
    SourceDecl::table("SkillIdInfo.json"),
    SourceDecl::table("PartsParameter.json"),
    SourceDecl::table("EquipParameter.json"),
    SourceDecl::with_index("MSList.json", IndexKind::SuitOwnership),
    SourceDecl::with_index("DerivedSynthesizeParameter.json", IndexKind::Synthesis),
    SourceDecl::table("ItemGunplaBox.json"),
    SourceDecl::table("ShopItem.json"),
    SourceDecl::table("MissionListTable.json"),
    SourceDecl::with_index("MissionRewardTable.json", IndexKind::MissionRewards),
];

/// Write one table document, array-wrapped like the real export.
fn write_doc(root: &Path, file: &str, name: &str, rows: Value) {
    let doc = json!([{ "Name": name, "Rows": rows }]);
    fs::write(root.join(file), serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

fn text_rows(rows: &[(&str, &str)]) -> Value {
    let mut map = serde_json::Map::new();
    for (id, text) in rows {
        map.insert(id.to_string(), json!({ "_Text": text }));
    }
    Value::Object(map)
}

fn suit_row(stem: &str, equips: [&str; 2]) -> Value {
    json!({
        "_head": format!("P_head_{stem}"),
        "_body": format!("P_body_{stem}"),
        "_armR": format!("P_armR_{stem}"),
        "_armL": format!("P_armL_{stem}"),
        "_leg": format!("P_leg_{stem}"),
        "_backpack": format!("P_bp_{stem}"),
        "_equip0": equips[0], "_equip1": equips[1],
        "_equip2": "None", "_equip3": "None", "_equip4": "None",
        "_equip5": "None", "_equip6": "None", "_equip7": "None",
    })
}

fn part_row(part_id: &str, group: &str, skills: &[&str]) -> Value {
    json!({
        "_PartsName": part_id,
        "_PartsCategory": "MS_PARTS_CATEGORY::BODY",
        "_SkillArray": skills.iter().map(|id| json!({"_SkillId": id})).collect::<Vec<_>>(),
        "_Other": {"_PerformanceGroupName": group},
    })
}

fn write_fixture(root: &Path) {
    write_doc(
        root,
        "localized_text_preset_character_name.json",
        tables::TEXT_PRESET_CHARACTER_NAME,
        text_rows(&[
            ("HG_0001", "Alpha Gundam"),
            ("HG_0002", "Beta Gundam"),
            ("HG_0003", "Gamma Gundam"),
            ("SD_0001", "Alpha SD"),
        ]),
    );
    write_doc(
        root,
        "localized_text_ms_number.json",
        tables::TEXT_MS_NUMBER,
        text_rows(&[
            ("HG_0001", "RX-0001"),
            ("HG_0002", "RX-0002"),
            ("HG_0003", "RX-0003"),
            ("SD_0001", "SD-0001"),
        ]),
    );
    write_doc(
        root,
        "localized_text_parts_name.json",
        tables::TEXT_PARTS_NAME,
        text_rows(&[
            ("P_head_0001", "Alpha Head"),
            ("P_body_0001", "Alpha Body"),
            ("P_armR_0001", "Alpha Right Arm"),
            ("P_armL_0001", "Alpha Left Arm"),
            ("P_leg_0001", "Alpha Legs"),
            ("P_bp_0001", "Alpha Backpack"),
            ("P_head_0002", "Beta Head"),
            ("P_head_0003", "Gamma Head"),
        ]),
    );
    write_doc(
        root,
        "localized_text_weapon_name.json",
        tables::TEXT_WEAPON_NAME,
        text_rows(&[("W_rifle_0001", "Beam Rifle")]),
    );
    write_doc(
        root,
        "localized_text_shield_name.json",
        tables::TEXT_SHIELD_NAME,
        text_rows(&[
            ("W_shield_0001", "Round Shield"),
            ("W_shield_0001L", "Round Shield"),
        ]),
    );
    write_doc(
        root,
        "localized_text_bparts_name.json",
        tables::TEXT_BPARTS_NAME,
        text_rows(&[]),
    );
    write_doc(
        root,
        "localized_text_story_title_name.json",
        tables::TEXT_STORY_TITLE,
        text_rows(&[("TextId_0101", "First Sortie")]),
    );
    write_doc(
        root,
        "localized_text_series_name.json",
        tables::TEXT_SERIES_NAME,
        text_rows(&[("Series_UC", "Universal Century")]),
    );
    write_doc(
        root,
        "localized_text_skill_name.json",
        tables::TEXT_SKILL_NAME,
        text_rows(&[
            ("SK_ex_1", "Beam Burst"),
            ("SK_op_1", "Repair Field"),
            ("SK_awk_1", "Awakened Drive"),
            ("SK_nml_1", "Rapid Fire"),
        ]),
    );
    write_doc(
        root,
        "localized_text_skill_info.json",
        tables::TEXT_SKILL_INFO,
        text_rows(&[
            ("SK_ex_1", "Fires a wide beam."),
            ("SK_op_1", "Restores armor over time."),
            ("SK_awk_1", "Unleashes the awakened frame."),
            ("SK_nml_1", "Quick consecutive shots."),
        ]),
    );
    write_doc(
        root,
        "SkillIdInfo.json",
        tables::SKILL_ID_INFO,
        json!({
            "SK_ex_1": {
                "_AbilityCartridgeCategory": "ABILITY_CARTRIDGE_CATEGORY::EX_ATTACK",
                "_HyperTranceId": "None",
                "_UiInfoArray": [{"_TextId": "SK_ex_1"}],
            },
            "SK_op_1": {
                "_AbilityCartridgeCategory": "ABILITY_CARTRIDGE_CATEGORY::OP_SUPPORT",
                "_HyperTranceId": "None",
                "_UiInfoArray": [{"_TextId": "SK_op_1"}],
            },
            "SK_awk_1": {
                "_AbilityCartridgeCategory": "ABILITY_CARTRIDGE_CATEGORY::SPECIAL",
                "_HyperTranceId": "HT_0001",
                "_UiInfoArray": [{"_TextId": "SK_awk_1"}],
            },
            "SK_nml_1": {
                "_AbilityCartridgeCategory": "ABILITY_CARTRIDGE_CATEGORY::NML_ATTACK",
                "_HyperTranceId": "None",
                "_UiInfoArray": [{"_TextId": "SK_nml_1"}],
            },
        }),
    );
    write_doc(
        root,
        "PartsParameter.json",
        tables::PARTS_PARAMETER,
        json!({
            "P_head_0001": part_row("P_head_0001", "HeadParts", &["SK_ex_1"]),
            "P_body_0001": part_row("P_body_0001", "BodyParts", &["SK_op_1", "SK_awk_1"]),
            "P_armR_0001": part_row("P_armR_0001", "ArmParts", &[]),
            "P_armL_0001": part_row("P_armL_0001", "ArmParts", &[]),
            "P_leg_0001": part_row("P_leg_0001", "LegParts", &[]),
            "P_bp_0001": part_row("P_bp_0001", "BackpackParts", &[]),
        }),
    );
    write_doc(
        root,
        "EquipParameter.json",
        tables::EQUIP_PARAMETER,
        json!({
            "W_rifle_0001": {
                "_PartsName": "W_rifle_0001",
                "_PartsCategory": "MS_EQUIP_CATEGORY::RIFLE",
                "_SkillArray": [{"_SkillId": "SK_nml_1"}],
            },
            "W_shield_0001": {
                "_PartsName": "W_shield_0001",
                "_PartsCategory": "MS_EQUIP_CATEGORY::SHIELD",
                "_SkillArray": [],
            },
            "W_shield_0001L": {
                "_PartsName": "W_shield_0001L",
                "_PartsCategory": "MS_EQUIP_CATEGORY::SHIELD",
                "_SkillArray": [],
            },
        }),
    );
    write_doc(
        root,
        "MSList.json",
        tables::MS_LIST,
        json!({
            "HG_0001": suit_row("0001", ["W_rifle_0001", "W_shield_0001"]),
            "HG_0002": suit_row("0002", ["W_shield_0001L", "None"]),
            "HG_0003": suit_row("0003", ["None", "None"]),
            "SD_0001": {
                "_head": "P_head_0001", "_body": "None", "_armR": "None",
                "_armL": "None", "_leg": "None", "_backpack": "None",
                "_equip0": "None", "_equip1": "None", "_equip2": "None",
                "_equip3": "None", "_equip4": "None", "_equip5": "None",
                "_equip6": "None", "_equip7": "None",
            },
        }),
    );
    write_doc(
        root,
        "DerivedSynthesizeParameter.json",
        tables::DERIVED_SYNTHESIZE,
        json!({
            "HG_0001": {
                "_TargetPartsId": "HG_0001",
                "_SynthesizeRecipeArray": [
                    {"_SrcPartsId1": "HG_0002", "_SrcPartsId2": "HG_0003"},
                ],
            },
            "HG_9999": {
                "_TargetPartsId": "HG_9999",
                "_SynthesizeRecipeArray": [
                    {"_SrcPartsId1": "HG_0002", "_SrcPartsId2": "HG_0003"},
                ],
            },
        }),
    );
    write_doc(
        root,
        "ItemGunplaBox.json",
        tables::ITEM_GUNPLA_BOX,
        json!({
            "GunplaBox_0001": {
                "_ItemId": "HG_0001",
                "_BoxArtId": "HGBoxArt_0001",
                "_GundamSeriesName": "Series_UC",
                "_ItemArray": ["P_head_0001", "P_body_0001", "W_rifle_0001"],
            },
        }),
    );
    write_doc(
        root,
        "ShopItem.json",
        tables::SHOP_ITEM,
        json!({
            "HG_0001": {"_Price": 1200},
        }),
    );
    write_doc(
        root,
        "MissionListTable.json",
        tables::MISSION_LIST,
        json!({
            "Mission01": {"_OperationMissionId": "Op01", "_MissionComments": "Intro sortie"},
            "Mission02": {"_OperationMissionId": "Op01", "_MissionComments": "Escort the convoy"},
            "Mission03": {"_OperationMissionId": "Op02", "_MissionComments": "Final stand"},
        }),
    );
    write_doc(
        root,
        "MissionRewardTable.json",
        tables::MISSION_REWARD,
        json!({
            "MissionReward_0101": {
                "_RewardArray": [{"_RewardId": "P_head_0001", "_RewardNum": 1}],
            },
            "MissionReward_0101A": {
                "_RewardArray": [{"_RewardId": "HG_0002", "_RewardNum": 1}],
            },
            "MissionReward_0101_B": {
                "_RewardArray": [{"_RewardId": "P_head_0001", "_RewardNum": 2}],
            },
            "MissionReward_0102": {
                "_RewardArray": [{"_RewardId": "W_rifle_0001", "_RewardNum": 1}],
            },
        }),
    );
}

fn load_fixture() -> (TempDir, Registry) {
    let dir = TempDir::new().expect("temp dir");
    write_fixture(dir.path());
    let registry = Registry::load(dir.path(), FIXTURE_SOURCES).expect("fixture loads");
    (dir, registry)
}

// =============================================================================
// Registry
// =============================================================================

#[test]
fn loaded_rows_expose_source_fields() {
    let (_dir, registry) = load_fixture();
    let suits = registry.table(tables::MS_LIST).unwrap();

    assert!(suits.contains("HG_0001"));
    let suit = suits.by_id("HG_0001").unwrap();
    assert_eq!(suit.str_field("_head").unwrap(), "P_head_0001");
    assert_eq!(suits.try_by_id("HG_0001").unwrap(), suit);

    assert!(!suits.contains("HG_0042"));
    assert!(suits.try_by_id("HG_0042").is_none());
    assert!(matches!(
        suits.by_id("HG_0042"),
        Err(DataError::RowNotFound { .. })
    ));
}

#[test]
fn missing_source_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    write_fixture(dir.path());
    const WITH_MISSING: &[SourceDecl] = &[SourceDecl::table("NotThere.json")];
    assert!(matches!(
        Registry::load(dir.path(), WITH_MISSING),
        Err(DataError::Io { .. })
    ));
}

#[test]
fn malformed_source_file_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("Broken.json"), "{not json").unwrap();
    const BROKEN: &[SourceDecl] = &[SourceDecl::table("Broken.json")];
    assert!(matches!(
        Registry::load(dir.path(), BROKEN),
        Err(DataError::Parse { .. })
    ));
}

#[test]
fn document_without_rows_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("NoRows.json"),
        serde_json::to_string(&json!([{ "Name": "NoRows" }])).unwrap(),
    )
    .unwrap();
    const NO_ROWS: &[SourceDecl] = &[SourceDecl::table("NoRows.json")];
    assert!(matches!(
        Registry::load(dir.path(), NO_ROWS),
        Err(DataError::Document { key: "Rows", .. })
    ));
}

// =============================================================================
// Ownership index
// =============================================================================

#[test]
fn ownership_covers_every_occupied_slot() {
    let (_dir, registry) = load_fixture();
    let index = registry.ownership().unwrap();
    let suits = registry.table(tables::MS_LIST).unwrap();

    for row in suits.all() {
        let suit = Suit::from_row(row);
        for slot in BodySlot::ALL {
            if let Some(part_id) = suit.slot_id(slot).unwrap() {
                let owners = index.owner_ids(part_id).unwrap();
                assert!(
                    owners.iter().any(|owner| owner == suit.id()),
                    "{part_id} owners missing {}",
                    suit.id()
                );
            }
        }
    }
}

#[test]
fn sole_owner_is_primary_owner() {
    let (_dir, registry) = load_fixture();
    let index = registry.ownership().unwrap();
    assert_eq!(index.primary_owner_id("P_body_0001").unwrap(), "HG_0001");
}

#[test]
fn shared_part_resolves_to_matching_owner() {
    let (_dir, registry) = load_fixture();
    let index = registry.ownership().unwrap();

    // P_head_0001 is shared by HG_0001 and SD_0001; both gradeless ids are
    // 0001, so the first owner in table order wins.
    assert_eq!(
        index.owner_ids("P_head_0001").unwrap(),
        ["HG_0001", "SD_0001"]
    );
    assert_eq!(index.primary_owner_id("P_head_0001").unwrap(), "HG_0001");

    let owner = index.primary_owner_of(&registry, "P_head_0001").unwrap();
    assert_eq!(owner.id(), "HG_0001");
}

#[test]
fn grade_variants_reflect_sibling_suits() {
    let (_dir, registry) = load_fixture();
    let suits = registry.table(tables::MS_LIST).unwrap();
    let suit = Suit::from_row(suits.by_id("HG_0001").unwrap());
    let variants = suit.grade_variants().unwrap();
    assert!(variants.has_hg);
    assert!(variants.has_sd);
    assert!(!variants.has_mg);
}

// =============================================================================
// Synthesis index
// =============================================================================

#[test]
fn distinct_slot_recipe_yields_six_triples() {
    let (_dir, registry) = load_fixture();
    let index = registry.synthesis().unwrap();

    // Only the HG_0001 recipe survives: HG_9999 is not in MSList.
    assert_eq!(index.len(), 6);

    for triple in index.iter() {
        assert_ne!(triple.target, triple.source1);
        assert_ne!(triple.target, triple.source2);
        assert!(index.find_derives_from(&triple.target).contains(&triple));
        assert!(index.find_derives_into(&triple.source1).contains(&triple));
        assert!(index.find_derives_into(&triple.source2).contains(&triple));
    }

    let head = index.find_derives_from("P_head_0001");
    assert_eq!(head.len(), 1);
    assert_eq!(head[0].source1, "P_head_0002");
    assert_eq!(head[0].source2, "P_head_0003");

    assert!(index.find_derives_from("P_head_9999").is_empty());
}

// =============================================================================
// Mission reward index
// =============================================================================

#[test]
fn clear_grades_group_under_the_bare_mission() {
    let (_dir, registry) = load_fixture();
    let index = registry.mission_rewards().unwrap();

    let entries = index.rewards_for("MissionReward_0101");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].clear_grade, None);
    assert_eq!(entries[0].item_id, "P_head_0001");
    assert!(entries[1].clear_grade.is_some());
    assert!(entries[2].clear_grade.is_some());

    // Reverse index keeps one entry per granting reward, repeats included.
    assert_eq!(
        index.missions_granting("P_head_0001"),
        ["MissionReward_0101", "MissionReward_0101"]
    );

    for (mission, entries) in index.missions() {
        for entry in entries {
            assert!(index
                .missions_granting(&entry.item_id)
                .iter()
                .any(|m| m == mission));
        }
    }
}

// =============================================================================
// Pages
// =============================================================================

#[test]
fn suit_page_renders_parts_equipment_and_recipes() {
    let (_dir, registry) = load_fixture();
    let page = suit_page::page(&registry, "HG_0001", "Generated").unwrap();

    assert_eq!(page.title, "Generated:alpha_gundam");
    assert!(page.content.contains("= Alpha Gundam ="));
    assert!(page.content.contains("'''Model number:''' RX-0001"));
    assert!(page.content.contains("=== Head: Alpha Head ==="));
    assert!(page.content.contains("'''Beam Burst''' Fires a wide beam."));
    assert!(page.content.contains("=== RIFLE: Beam Rifle ==="));
    // Suit-level recipe named through both source suits.
    assert!(page.content.contains("[[Generated:beta_gundam|Beta Gundam]]"));
    assert!(page.content.contains("[[Generated:gamma_gundam|Gamma Gundam]]"));
}

#[test]
fn suit_batch_reports_failures_without_aborting() {
    let (_dir, registry) = load_fixture();
    let report = suit_page::all_pages(&registry, "Generated").unwrap();

    let titles: Vec<_> = report.pages.iter().map(|p| p.title.as_str()).collect();
    assert!(titles.contains(&"Generated:alpha_gundam"));
    assert!(titles.contains(&"Generated:alpha_sd"));

    // HG_0002 and HG_0003 have names but no part parameter rows; they fail
    // individually and the batch continues.
    let failed: Vec<_> = report.failures.iter().map(|(id, _)| id.as_str()).collect();
    assert!(failed.contains(&"HG_0002"));
    assert!(failed.contains(&"HG_0003"));
}

#[test]
fn kit_page_names_parts_through_the_ownership_index() {
    let (_dir, registry) = load_fixture();
    let page = kit_page::page(&registry, "GunplaBox_0001", "Generated").unwrap();

    assert_eq!(page.title, "Generated:Kit_HG_Alpha_Gundam");
    assert!(page.content.contains("'''Grade:''' HG"));
    assert!(page.content.contains("'''Price:''' 1200"));
    assert!(page.content.contains("'''Series:''' Universal Century"));
    assert!(page.content.contains("=== Head: Alpha Head (Alpha Gundam) ==="));
    assert!(page.content.contains("=== RIFLE: Beam Rifle ==="));
}

#[test]
fn equipment_pages_collapse_left_hand_variants() {
    let (_dir, registry) = load_fixture();
    let report = equip_page::all_pages(&registry, "Generated").unwrap();
    assert!(report.failures.is_empty());

    let titles: Vec<_> = report.pages.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Generated:beam_rifle"));
    assert!(titles.contains(&"Generated:round_shield"));

    let shield = report
        .pages
        .iter()
        .find(|p| p.title == "Generated:round_shield")
        .unwrap();
    // Both the base and the L-suffixed carrier land on one page.
    assert!(shield.content.contains("Alpha Gundam (0001)"));
    assert!(shield.content.contains("Beta Gundam (0002)"));

    let rifle = report
        .pages
        .iter()
        .find(|p| p.title == "Generated:beam_rifle")
        .unwrap();
    assert!(rifle.content.contains("'''Rapid Fire''' Quick consecutive shots."));
    assert!(rifle.content.contains("HG Alpha Gundam (GunplaBox_0001)"));
}

#[test]
fn mission_rewards_page_names_items_and_missions() {
    let (_dir, registry) = load_fixture();
    let page = mission_page::rewards_page(&registry, "Generated").unwrap();

    assert_eq!(page.title, "Generated:Mission_Rewards");
    assert!(page.content.contains("== Alpha Head =="));
    assert!(page.content.contains("== Beta Gundam =="));
    assert!(page.content.contains("== Beam Rifle =="));
    // Story-titled missions render bold, unresolved ones as their raw id.
    assert!(page.content.contains("* '''First Sortie'''"));
    assert!(page.content.contains("* MissionReward_0102"));
}

#[test]
fn missions_listing_groups_by_operation() {
    let (_dir, registry) = load_fixture();
    let listing = mission_page::missions_listing(&registry).unwrap();
    assert!(listing.contains("== Op01 =="));
    assert!(listing.contains("* Mission01 Intro sortie"));
    assert!(listing.contains("* Mission02 Escort the convoy"));
    assert!(listing.contains("== Op02 =="));
}

#[test]
fn derives_into_listing_names_every_part() {
    let (_dir, registry) = load_fixture();
    let listing = recipes::derives_into_listing(&registry, "P_head_0002").unwrap();
    assert!(listing.contains("P_head_0001 Alpha Head"));
    assert!(listing.contains("P_head_0002 Beta Head"));
}
