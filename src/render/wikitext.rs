//! MediaWiki markup generation.
//!
//! Pure text assembly over the page-data structs; no registry access.

use std::fmt::Write;

use indexmap::IndexMap;

use crate::render::equip_page::EquipPageData;
use crate::render::kit_page::KitPageData;
use crate::render::mission_page::RewardSection;
use crate::render::skills::{EquipSkills, PartSkills, SkillEntry};
use crate::render::suit_page::{EquipSection, SuitPageData};

pub fn render_suit_page(data: &SuitPageData, namespace: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "= {} =", data.name);
    let _ = writeln!(out, "'''Model number:''' {}", data.number);
    out.push('\n');

    out.push_str("== Parts ==\n");
    for part in &data.parts {
        let _ = writeln!(out, "=== {}: {} ===", part.slot, part.part_name);
        part_skill_table(&mut out, &part.skills);
    }

    if !data.equips.is_empty() {
        out.push_str("== Equipment ==\n");
        for equip in &data.equips {
            equip_section(&mut out, equip);
        }
    }

    if !data.derive_from.is_empty() {
        out.push_str("== Derived from ==\n");
        for entry in &data.derive_from {
            let _ = writeln!(
                out,
                "* {} + {}",
                page_link(namespace, &entry.subject_slug, &entry.subject_name),
                page_link(namespace, &entry.material_slug, &entry.material_name),
            );
        }
        out.push('\n');
    }

    if !data.derive_into.is_empty() {
        out.push_str("== Derives into ==\n");
        for entry in &data.derive_into {
            let _ = writeln!(
                out,
                "* {} with {}",
                page_link(namespace, &entry.subject_slug, &entry.subject_name),
                page_link(namespace, &entry.material_slug, &entry.material_name),
            );
        }
        out.push('\n');
    }

    out
}

pub fn render_kit_page(data: &KitPageData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "= {} =", data.name);
    let _ = writeln!(out, "'''Grade:''' {}", data.grade);
    if let Some(price) = data.price {
        let _ = writeln!(out, "'''Price:''' {price}");
    }
    let _ = writeln!(out, "'''Series:''' {}", data.series);
    out.push('\n');

    if !data.parts.is_empty() {
        out.push_str("== Parts ==\n");
        for part in &data.parts {
            let _ = writeln!(
                out,
                "=== {}: {} ({}) ===",
                part.part_type, part.part_name, part.suit_name
            );
            part_skill_table(&mut out, &part.skills);
        }
    }

    if !data.equips.is_empty() {
        out.push_str("== Equipment ==\n");
        for equip in &data.equips {
            equip_section(&mut out, equip);
        }
    }

    out
}

pub fn render_equip_page(data: &EquipPageData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "= {} =", data.name);
    let _ = writeln!(out, "'''Type:''' {}", data.equip_type);
    out.push('\n');

    equip_skill_table(&mut out, &data.skills);

    if !data.suits.is_empty() {
        out.push_str("== Suits ==\n");
        for (suit_id, suit_name) in &data.suits {
            let _ = writeln!(out, "* {suit_name} ({suit_id})");
        }
        out.push('\n');
    }

    if !data.kits.is_empty() {
        out.push_str("== Kits ==\n");
        for (box_id, grade, kit_name) in &data.kits {
            let _ = writeln!(out, "* {grade} {kit_name} ({box_id})");
        }
        out.push('\n');
    }

    out
}

pub fn render_missions(operations: &IndexMap<String, Vec<String>>) -> String {
    let mut out = String::new();
    out.push_str("= Missions =\n");
    for (operation, missions) in operations {
        let _ = writeln!(out, "== {operation} ==");
        for mission in missions {
            let _ = writeln!(out, "* {mission}");
        }
    }
    out
}

pub fn render_rewards(sections: &[RewardSection]) -> String {
    let mut out = String::new();
    out.push_str("= Mission Rewards =\n");
    for section in sections {
        let _ = writeln!(out, "== {} ==", section.item_name);
        for mission in &section.missions {
            if mission.named {
                let _ = writeln!(out, "* '''{}'''", mission.label);
            } else {
                let _ = writeln!(out, "* {}", mission.label);
            }
        }
    }
    out
}

fn page_link(namespace: &str, slug: &str, label: &str) -> String {
    format!("[[{namespace}:{slug}|{label}]]")
}

fn equip_section(out: &mut String, equip: &EquipSection) {
    let _ = writeln!(out, "=== {}: {} ===", equip.equip_type, equip.name);
    equip_skill_table(out, &equip.skills);
}

fn part_skill_table(out: &mut String, skills: &PartSkills) {
    skill_table(
        out,
        &[
            ("EX Skills", &skills.ex),
            ("OP Skills", &skills.op),
            ("Awakened Skills", &skills.awaken),
        ],
    );
}

fn equip_skill_table(out: &mut String, skills: &EquipSkills) {
    skill_table(
        out,
        &[
            ("Skills", &skills.normal),
            ("EX Skills", &skills.ex),
            ("OP Skills", &skills.op),
            ("Awakened Skills", &skills.awaken),
        ],
    );
}

/// Emit one wikitable with the given columns, rows zipped to the longest
/// column.
fn skill_table(out: &mut String, columns: &[(&str, &Vec<SkillEntry>)]) {
    let rows = columns.iter().map(|(_, list)| list.len()).max().unwrap_or(0);
    if rows == 0 {
        out.push('\n');
        return;
    }

    out.push_str("{| class=\"wikitable\"\n|-\n");
    let headers: Vec<&str> = columns.iter().map(|(header, _)| *header).collect();
    let _ = writeln!(out, "! {}", headers.join(" !! "));
    for row in 0..rows {
        out.push_str("|-\n");
        let cells: Vec<String> = columns
            .iter()
            .map(|(_, list)| match list.get(row) {
                Some(entry) => format!("'''{}''' {}", entry.name, entry.info),
                None => String::new(),
            })
            .collect();
        let _ = writeln!(out, "| {}", cells.join(" || "));
    }
    out.push_str("|}\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> SkillEntry {
        SkillEntry {
            name: name.to_string(),
            info: format!("about {name}"),
            ability_type: "EX_ATTACK".to_string(),
        }
    }

    #[test]
    fn skill_table_pads_short_columns() {
        let mut out = String::new();
        let ex = vec![entry("one"), entry("two")];
        let op = vec![entry("three")];
        skill_table(&mut out, &[("EX Skills", &ex), ("OP Skills", &op)]);

        assert!(out.contains("! EX Skills !! OP Skills"));
        assert!(out.contains("| '''one''' about one || '''three''' about three"));
        assert!(out.contains("| '''two''' about two || "));
    }

    #[test]
    fn empty_table_renders_nothing() {
        let mut out = String::new();
        skill_table(&mut out, &[("EX Skills", &Vec::new())]);
        assert!(!out.contains("wikitable"));
    }
}
