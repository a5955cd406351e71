//! Mission reward grouping and the reverse item-to-missions lookup.
//!
//! Raw rows are keyed by mission id, optionally suffixed with a clear grade
//! letter (`A`–`D`, `S`), with or without a separating underscore. The
//! builder splits the suffix off, groups every reward entry under the bare
//! mission id tagged with its grade, and records, per reward item, each
//! mission entry that grants it.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{DataError, Result};
use crate::registry::{tables, Registry};

/// Only these trailing letters denote a clear grade; any other suffix is
/// part of the mission id.
static CLEAR_GRADE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+?)_?([A-DS])$").expect("clear grade pattern"));

/// Clear grade tier of a mission reward row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearGrade {
    A,
    B,
    C,
    D,
    S,
}

impl ClearGrade {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "A" => Some(ClearGrade::A),
            "B" => Some(ClearGrade::B),
            "C" => Some(ClearGrade::C),
            "D" => Some(ClearGrade::D),
            "S" => Some(ClearGrade::S),
            _ => None,
        }
    }
}

impl std::fmt::Display for ClearGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letter = match self {
            ClearGrade::A => "A",
            ClearGrade::B => "B",
            ClearGrade::C => "C",
            ClearGrade::D => "D",
            ClearGrade::S => "S",
        };
        f.write_str(letter)
    }
}

/// Split a raw row key into the bare mission id and its clear grade.
pub fn split_clear_grade(key: &str) -> (&str, Option<ClearGrade>) {
    if let Some(caps) = CLEAR_GRADE_RE.captures(key) {
        let base = caps.get(1).expect("base group").as_str();
        let grade = ClearGrade::from_letter(caps.get(2).expect("grade group").as_str());
        if let Some(grade) = grade {
            return (base, Some(grade));
        }
    }
    (key, None)
}

/// One reward entry, tagged with the grade of the row it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardEntry {
    pub mission_id: String,
    pub clear_grade: Option<ClearGrade>,
    pub item_id: String,
    pub quantity: Option<u64>,
}

pub struct MissionRewardIndex {
    by_mission: IndexMap<String, Vec<RewardEntry>>,
    by_item: IndexMap<String, Vec<String>>,
}

impl MissionRewardIndex {
    /// Runs once, when the MissionRewardTable registers.
    pub fn build(registry: &Registry) -> Result<Self> {
        let table = registry.table(tables::MISSION_REWARD)?;

        let mut by_mission: IndexMap<String, Vec<RewardEntry>> = IndexMap::new();
        let mut by_item: IndexMap<String, Vec<String>> = IndexMap::new();

        for row in table.all() {
            let (mission_id, clear_grade) = split_clear_grade(row.id());
            // Rows without a reward array contribute nothing.
            let Some(entries) = row.raw("_RewardArray").and_then(Value::as_array) else {
                continue;
            };
            for entry in entries {
                let item_id = entry
                    .get("_RewardId")
                    .and_then(Value::as_str)
                    .ok_or_else(|| DataError::FieldShape {
                        table: tables::MISSION_REWARD.to_string(),
                        id: row.id().to_string(),
                        field: "_RewardArray",
                        expected: "a list of records with a reward id",
                    })?;
                let quantity = entry.get("_RewardNum").and_then(Value::as_u64);

                by_mission
                    .entry(mission_id.to_string())
                    .or_default()
                    .push(RewardEntry {
                        mission_id: mission_id.to_string(),
                        clear_grade,
                        item_id: item_id.to_string(),
                        quantity,
                    });
                // Deliberately not deduplicated: one mission appears once
                // per entry granting the item.
                by_item
                    .entry(item_id.to_string())
                    .or_default()
                    .push(mission_id.to_string());
            }
        }

        Ok(Self {
            by_mission,
            by_item,
        })
    }

    /// Every reward entry of a bare mission id, across all clear grades.
    pub fn rewards_for(&self, mission_id: &str) -> &[RewardEntry] {
        self.by_mission
            .get(mission_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Bare mission ids granting an item, one per granting entry.
    pub fn missions_granting(&self, item_id: &str) -> &[String] {
        self.by_item.get(item_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate the reverse index in first-seen order.
    pub fn reward_item_map(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_item
            .iter()
            .map(|(item, missions)| (item.as_str(), missions.as_slice()))
    }

    /// Iterate grouped missions in first-seen order.
    pub fn missions(&self) -> impl Iterator<Item = (&str, &[RewardEntry])> {
        self.by_mission
            .iter()
            .map(|(mission, entries)| (mission.as_str(), entries.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::testutil::{doc, registry_from_docs};
    use crate::registry::IndexKind;
    use serde_json::json;

    #[test]
    fn splits_recognized_grades_only() {
        assert_eq!(split_clear_grade("Op01"), ("Op01", None));
        assert_eq!(split_clear_grade("Op01A"), ("Op01", Some(ClearGrade::A)));
        assert_eq!(split_clear_grade("Op01_S"), ("Op01", Some(ClearGrade::S)));
        assert_eq!(split_clear_grade("Op01X"), ("Op01X", None));
        assert_eq!(split_clear_grade("A"), ("A", None));
    }

    fn rewards(items: &[&str]) -> serde_json::Value {
        json!({
            "_RewardArray": items
                .iter()
                .map(|id| json!({"_RewardId": id, "_RewardNum": 1}))
                .collect::<Vec<_>>(),
        })
    }

    fn registry_with(rows: serde_json::Value) -> Registry {
        registry_from_docs(vec![(
            doc(tables::MISSION_REWARD, rows),
            Some(IndexKind::MissionRewards),
        )])
        .unwrap()
    }

    #[test]
    fn grade_rows_collapse_onto_bare_mission() {
        let registry = registry_with(json!({
            "Op01": rewards(&["item_base"]),
            "Op01A": rewards(&["item_a"]),
            "Op01B": rewards(&["item_b"]),
        }));
        let index = registry.mission_rewards().unwrap();
        let entries = index.rewards_for("Op01");
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].clear_grade, None);
        assert_eq!(entries[1].clear_grade, Some(ClearGrade::A));
        assert_eq!(entries[2].clear_grade, Some(ClearGrade::B));
        assert!(entries.iter().all(|entry| entry.mission_id == "Op01"));
    }

    #[test]
    fn reverse_index_keeps_repeats() {
        let registry = registry_with(json!({
            "Op01A": rewards(&["item_x", "item_x"]),
            "Op02": rewards(&["item_x"]),
        }));
        let index = registry.mission_rewards().unwrap();
        assert_eq!(index.missions_granting("item_x"), ["Op01", "Op01", "Op02"]);
    }

    #[test]
    fn reverse_index_covers_every_entry() {
        let registry = registry_with(json!({
            "Op01": rewards(&["item_a", "item_b"]),
            "Op02S": rewards(&["item_a"]),
        }));
        let index = registry.mission_rewards().unwrap();
        for (mission, entries) in index.missions() {
            for entry in entries {
                assert!(index
                    .missions_granting(&entry.item_id)
                    .iter()
                    .any(|m| m == mission));
            }
        }
    }

    #[test]
    fn unknown_ids_yield_empty_slices() {
        let registry = registry_with(json!({}));
        let index = registry.mission_rewards().unwrap();
        assert!(index.rewards_for("nope").is_empty());
        assert!(index.missions_granting("nope").is_empty());
    }
}
