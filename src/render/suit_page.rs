//! Suit page assembly.

use crate::error::{DataError, Result};
use crate::registry::{tables, Registry};
use crate::render::skills::{equip_skills, part_skills, EquipSkills, PartSkills};
use crate::render::wikitext;
use crate::render::{BatchReport, Page};
use crate::slug::page_slug;
use crate::views::{BodySlot, Suit, SynthesisRecipe};

#[derive(Debug, Clone)]
pub struct SuitPageData {
    pub name: String,
    pub number: String,
    pub parts: Vec<PartSection>,
    pub equips: Vec<EquipSection>,
    pub derive_from: Vec<DeriveEntry>,
    pub derive_into: Vec<DeriveEntry>,
}

#[derive(Debug, Clone)]
pub struct PartSection {
    pub slot: &'static str,
    pub part_name: String,
    pub skills: PartSkills,
}

#[derive(Debug, Clone)]
pub struct EquipSection {
    pub equip_type: String,
    pub name: String,
    pub skills: EquipSkills,
}

/// One suit-level synthesis relation, named and sluggified for linking.
#[derive(Debug, Clone)]
pub struct DeriveEntry {
    /// Result suit (derive-into) or base suit (derive-from).
    pub subject_name: String,
    pub subject_slug: String,
    pub material_name: String,
    pub material_slug: String,
}

/// Assemble the page data for one suit.
pub fn assemble(registry: &Registry, suit_id: &str) -> Result<SuitPageData> {
    let suits = registry.table(tables::MS_LIST)?;
    let suit = Suit::from_row(suits.by_id(suit_id)?);

    let name = suit.name_localized()?.text()?.to_string();
    let number = suit.number_localized()?.text()?.to_string();

    let mut parts = Vec::new();
    for slot in BodySlot::ALL {
        let Some(part) = suit.part_params(slot)? else {
            continue;
        };
        parts.push(PartSection {
            slot: slot.label(),
            part_name: part.name_localized()?.text()?.to_string(),
            skills: part_skills(&part)?,
        });
    }

    let mut equips = Vec::new();
    for equip in suit.all_equip_params()? {
        equips.push(EquipSection {
            equip_type: equip.category_kind()?.to_string(),
            name: equip.name_localized()?.text()?.to_string(),
            skills: equip_skills(&equip)?,
        });
    }

    Ok(SuitPageData {
        name,
        number,
        parts,
        equips,
        derive_from: derive_from(registry, &suit)?,
        derive_into: derive_into(registry, &suit)?,
    })
}

/// Render one suit page.
pub fn page(registry: &Registry, suit_id: &str, namespace: &str) -> Result<Page> {
    let data = assemble(registry, suit_id)?;
    let title = format!("{namespace}:{}", page_slug(&data.name));
    let content = wikitext::render_suit_page(&data, namespace);
    Ok(Page { title, content })
}

/// Render every suit with a resolvable display name. Suits without one are
/// skipped (enemy-only entries have no preset character name); any other
/// per-suit failure is reported.
pub fn all_pages(registry: &Registry, namespace: &str) -> Result<BatchReport> {
    let suits = registry.table(tables::MS_LIST)?;
    let mut report = BatchReport::default();
    for row in suits.all() {
        let suit = Suit::from_row(row);
        match suit.name_localized() {
            Ok(_) => {}
            Err(DataError::RowNotFound { .. }) => continue,
            Err(err) => return Err(err),
        }
        let result = page(registry, suit.id(), namespace);
        match result {
            Err(err) if !err.is_per_item() => return Err(err),
            result => report.record(suit.id(), result),
        }
    }
    Ok(report)
}

fn suit_name(registry: &Registry, suit_id: &str) -> Result<String> {
    let suits = registry.table(tables::MS_LIST)?;
    let suit = Suit::from_row(suits.by_id(suit_id)?);
    Ok(suit.name_localized()?.text()?.to_string())
}

/// Suit-level recipes producing this suit, from its own synthesis row.
fn derive_from(registry: &Registry, suit: &Suit) -> Result<Vec<DeriveEntry>> {
    let Some(recipe) = suit.synthesis()? else {
        return Ok(Vec::new());
    };
    let mut entries = Vec::new();
    for (src1, src2) in recipe.recipe_pairs()? {
        let base = suit_name(registry, src1)?;
        let material = suit_name(registry, src2)?;
        entries.push(DeriveEntry {
            subject_slug: page_slug(&base),
            subject_name: base,
            material_slug: page_slug(&material),
            material_name: material,
        });
    }
    Ok(entries)
}

/// Suit-level recipes consuming this suit, scanned from the synthesis
/// table. Recipes touching suits absent from the export are skipped.
fn derive_into(registry: &Registry, suit: &Suit) -> Result<Vec<DeriveEntry>> {
    let recipes = registry.table(tables::DERIVED_SYNTHESIZE)?;
    let mut entries = Vec::new();
    for row in recipes.all() {
        let recipe = SynthesisRecipe::from_row(row);
        for (src1, src2) in recipe.recipe_pairs()? {
            if suit.id() != src1 && suit.id() != src2 {
                continue;
            }
            let material_id = if src2 == suit.id() { src1 } else { src2 };
            let named = recipe
                .target_parts_id()
                .and_then(|target| suit_name(registry, target))
                .and_then(|result| Ok((result, suit_name(registry, material_id)?)));
            match named {
                Ok((result, material)) => entries.push(DeriveEntry {
                    subject_slug: page_slug(&result),
                    subject_name: result,
                    material_slug: page_slug(&material),
                    material_name: material,
                }),
                Err(err) if err.is_per_item() => {
                    tracing::debug!(recipe = recipe.id(), error = %err, "skipped derive-into entry");
                }
                Err(err) => return Err(err),
            }
        }
    }
    Ok(entries)
}
