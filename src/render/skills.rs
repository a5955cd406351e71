//! Skill bucketing shared by the suit, kit and equipment pages.

use crate::error::Result;
use crate::views::{EquipParameter, PartParameter};

/// One skill ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillEntry {
    pub name: String,
    pub info: String,
    pub ability_type: String,
}

/// Part skills bucketed the way the suit page lays them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartSkills {
    pub ex: Vec<SkillEntry>,
    pub op: Vec<SkillEntry>,
    pub awaken: Vec<SkillEntry>,
}

/// Bucket a part's skills: EX and OP by category, awakening skills by their
/// hyper trance id.
pub fn part_skills(part: &PartParameter) -> Result<PartSkills> {
    let mut skills = PartSkills::default();
    for skill in part.skill_details()? {
        let ability_type = skill.ability_type()?;
        let entry = SkillEntry {
            name: skill.name_localized()?.text()?.to_string(),
            info: skill.info_localized()?.text()?.to_string(),
            ability_type: ability_type.to_string(),
        };
        if ability_type.contains("EX") {
            skills.ex.push(entry);
        } else if ability_type.contains("OP") {
            skills.op.push(entry);
        } else if skill.is_awaken()? {
            skills.awaken.push(entry);
        }
    }
    Ok(skills)
}

/// Equipment skills bucketed the way the equipment pages lay them out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipSkills {
    pub normal: Vec<SkillEntry>,
    pub ex: Vec<SkillEntry>,
    pub op: Vec<SkillEntry>,
    pub awaken: Vec<SkillEntry>,
}

/// Bucket an equipment piece's skills by UI category. Skills without UI
/// name or description text are skipped; trimmed exports drop the text rows
/// for unreleased skills.
pub fn equip_skills(equip: &EquipParameter) -> Result<EquipSkills> {
    let mut skills = EquipSkills::default();
    for skill in equip.skill_details()? {
        let (Some(name), Some(info)) = (skill.ui_name_localized()?, skill.ui_info_localized()?)
        else {
            continue;
        };
        let ability_type = skill.ability_type()?;
        let entry = SkillEntry {
            name: name.to_string(),
            info: info.to_string(),
            ability_type: ability_type.to_string(),
        };
        if ability_type.contains("NML_") {
            skills.normal.push(entry);
        } else if ability_type.contains("ORIGINAL") {
            skills.awaken.push(entry);
        } else if ability_type.contains("EX") {
            skills.ex.push(entry);
        } else if ability_type.contains("OP") {
            skills.op.push(entry);
        }
    }
    Ok(skills)
}
