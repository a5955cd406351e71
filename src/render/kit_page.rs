//! Kit (gunpla box) page assembly.

use crate::error::{DataError, Result};
use crate::registry::{tables, Registry};
use crate::render::skills::{equip_skills, part_skills, PartSkills};
use crate::render::suit_page::EquipSection;
use crate::render::wikitext;
use crate::render::{BatchReport, Page};
use crate::slug::title_slug;
use crate::views::{EquipParameter, GunplaBox};

#[derive(Debug, Clone)]
pub struct KitPageData {
    pub name: String,
    pub grade: String,
    pub price: Option<u64>,
    pub series: String,
    pub parts: Vec<KitPartSection>,
    pub equips: Vec<EquipSection>,
}

#[derive(Debug, Clone)]
pub struct KitPartSection {
    pub part_type: String,
    pub part_name: String,
    /// Display name of the part's canonical owning suit.
    pub suit_name: String,
    pub skills: PartSkills,
}

/// Assemble the page data for one kit box.
pub fn assemble(registry: &Registry, kit_id: &str) -> Result<KitPageData> {
    let boxes = registry.table(tables::ITEM_GUNPLA_BOX)?;
    let kit = GunplaBox::from_row(boxes.by_id(kit_id)?);
    let ownership = registry.ownership()?;

    let name = kit.name_localized()?.text()?.to_string();
    let series = match kit.series_name_localized()? {
        Some(text) => text.text()?.to_string(),
        None => kit.series_name()?.to_string(),
    };
    let price = match kit.shop_listing()? {
        Some(listing) => Some(listing.price()?),
        None => None,
    };

    let mut parts = Vec::new();
    for part in kit.parts()? {
        let suit = ownership.primary_owner_of(registry, part.id())?;
        parts.push(KitPartSection {
            part_type: part.performance_group()?.replace("Parts", ""),
            part_name: part.name_localized()?.text()?.to_string(),
            suit_name: suit.name_localized()?.text()?.to_string(),
            skills: part_skills(&part)?,
        });
    }

    let mut equips = Vec::new();
    for equip in kit.equips()? {
        if let Some(section) = equip_section(&equip)? {
            equips.push(section);
        }
    }

    Ok(KitPageData {
        name,
        grade: kit.grade()?.to_string(),
        price,
        series,
        parts,
        equips,
    })
}

/// Render one kit page.
pub fn page(registry: &Registry, kit_id: &str, namespace: &str) -> Result<Page> {
    let data = assemble(registry, kit_id)?;
    let title = format!(
        "{namespace}:Kit_{}_{}",
        data.grade,
        title_slug(&data.name)
    );
    let content = wikitext::render_kit_page(&data);
    Ok(Page { title, content })
}

/// Render every kit with a resolvable display name.
pub fn all_pages(registry: &Registry, namespace: &str) -> Result<BatchReport> {
    let boxes = registry.table(tables::ITEM_GUNPLA_BOX)?;
    let mut report = BatchReport::default();
    for row in boxes.all() {
        let kit = GunplaBox::from_row(row);
        match kit.name_localized() {
            Ok(_) => {}
            Err(DataError::RowNotFound { .. }) => continue,
            Err(err) => return Err(err),
        }
        let result = page(registry, kit.id(), namespace);
        match result {
            Err(err) if !err.is_per_item() => return Err(err),
            result => report.record(kit.id(), result),
        }
    }
    Ok(report)
}

/// Build an equipment section, or no value when the equipment has no
/// localized display name.
pub(crate) fn equip_section(equip: &EquipParameter) -> Result<Option<EquipSection>> {
    let name = match equip.name_localized() {
        Ok(text) => text.text()?.to_string(),
        Err(DataError::RowNotFound { .. }) => return Ok(None),
        Err(err) => return Err(err),
    };
    Ok(Some(EquipSection {
        equip_type: equip.category_kind()?.to_string(),
        name,
        skills: equip_skills(equip)?,
    }))
}
