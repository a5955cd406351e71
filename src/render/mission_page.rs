//! Mission listing and mission rewards pages.

use indexmap::IndexMap;

use crate::error::Result;
use crate::registry::{tables, Registry};
use crate::render::wikitext;
use crate::render::Page;
use crate::views::{MissionEntry, TextRow};

/// Text tables probed, in order, when naming a reward item. The id spaces
/// are disjoint, so the first table containing the id names it.
const ITEM_NAME_TABLES: [&str; 5] = [
    tables::TEXT_PRESET_CHARACTER_NAME,
    tables::TEXT_PARTS_NAME,
    tables::TEXT_WEAPON_NAME,
    tables::TEXT_SHIELD_NAME,
    tables::TEXT_BPARTS_NAME,
];

/// Missions grouped by operation, each line `<id> <comments>`.
pub fn missions_listing(registry: &Registry) -> Result<String> {
    let table = registry.table(tables::MISSION_LIST)?;
    let mut operations: IndexMap<String, Vec<String>> = IndexMap::new();
    for row in table.all() {
        let mission = MissionEntry::from_row(row);
        let fields = mission.operation_mission_id().and_then(|operation| {
            Ok((operation.to_string(), mission.mission_comments()?.to_string()))
        });
        let (operation, comments) = match fields {
            Ok(fields) => fields,
            Err(err) if err.is_per_item() => {
                tracing::warn!(mission = mission.id(), error = %err, "skipped mission");
                continue;
            }
            Err(err) => return Err(err),
        };
        operations
            .entry(operation)
            .or_default()
            .push(format!("{} {comments}", mission.id()));
    }
    Ok(wikitext::render_missions(&operations))
}

/// A reward section of the rewards page: one item and the missions that
/// grant it.
#[derive(Debug, Clone)]
pub struct RewardSection {
    pub item_name: String,
    pub missions: Vec<MissionLink>,
}

#[derive(Debug, Clone)]
pub struct MissionLink {
    pub label: String,
    /// Whether a story title resolved; unresolved missions render as their
    /// raw id.
    pub named: bool,
}

/// Render the mission rewards page from the reverse reward index.
pub fn rewards_page(registry: &Registry, namespace: &str) -> Result<Page> {
    let index = registry.mission_rewards()?;
    let mut sections = Vec::new();
    for (item_id, missions) in index.reward_item_map() {
        let item_name = item_display_name(registry, item_id)?;
        let missions = missions
            .iter()
            .map(|mission_id| {
                Ok(match mission_display_name(registry, mission_id)? {
                    Some(label) => MissionLink { label, named: true },
                    None => MissionLink {
                        label: mission_id.clone(),
                        named: false,
                    },
                })
            })
            .collect::<Result<Vec<_>>>()?;
        sections.push(RewardSection {
            item_name,
            missions,
        });
    }
    Ok(Page {
        title: format!("{namespace}:Mission_Rewards"),
        content: wikitext::render_rewards(&sections),
    })
}

/// Name a reward item by probing the name tables in declared order; ids
/// named by none of them display as themselves. Only the not-found
/// condition moves the probe to the next table.
fn item_display_name(registry: &Registry, item_id: &str) -> Result<String> {
    for table in ITEM_NAME_TABLES {
        if let Some(row) = registry.table(table)?.try_by_id(item_id) {
            return Ok(TextRow::from_row(row).text()?.replace('\n', " "));
        }
    }
    Ok(item_id.to_string())
}

/// Resolve a mission's story title: reward row keys map onto story text
/// keys by substituting the id prefix.
fn mission_display_name(registry: &Registry, mission_id: &str) -> Result<Option<String>> {
    let story_key = mission_id.replace("MissionReward", "TextId");
    match registry
        .table(tables::TEXT_STORY_TITLE)?
        .try_by_id(&story_key)
    {
        Some(row) => Ok(Some(TextRow::from_row(row).text()?.to_string())),
        None => Ok(None),
    }
}
