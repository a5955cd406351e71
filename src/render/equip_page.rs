//! Equipment index pages: one page per distinct weapon or shield, listing
//! which suits and kits carry it.

use indexmap::IndexMap;

use crate::error::Result;
use crate::registry::{tables, Registry};
use crate::render::skills::{equip_skills, EquipSkills};
use crate::render::wikitext;
use crate::render::{BatchReport, Page};
use crate::slug::page_slug;
use crate::views::{EquipParameter, GunplaBox, Suit};

#[derive(Debug, Clone)]
pub struct EquipPageData {
    pub name: String,
    pub equip_type: String,
    pub skills: EquipSkills,
    /// Gradeless suit id -> suit display name.
    pub suits: Vec<(String, String)>,
    /// Box id -> (grade, kit display name).
    pub kits: Vec<(String, String, String)>,
}

struct Collected<'r> {
    equip: EquipParameter<'r>,
    suits: IndexMap<String, String>,
    kits: IndexMap<String, (String, String)>,
}

/// Render every collected equipment page. Equipment ids collapse left-hand
/// `L`-suffixed variants onto their base id; suits and kits without a
/// display name do not contribute carriers.
pub fn all_pages(registry: &Registry, namespace: &str) -> Result<BatchReport> {
    let collected = collect(registry)?;
    let mut report = BatchReport::default();
    for (key, entry) in collected {
        let result = make_page(&entry, namespace);
        match result {
            Err(err) if !err.is_per_item() => return Err(err),
            result => report.record(key, result),
        }
    }
    Ok(report)
}

fn collect(registry: &Registry) -> Result<IndexMap<&str, Collected<'_>>> {
    let mut entries: IndexMap<&str, Collected<'_>> = IndexMap::new();

    let suits = registry.table(tables::MS_LIST)?;
    for row in suits.all() {
        let suit = Suit::from_row(row);
        let name = match suit.name_localized().and_then(|text| text.text()) {
            Ok(name) => name.to_string(),
            Err(err) if err.is_per_item() => continue,
            Err(err) => return Err(err),
        };
        let equips = match suit.all_equip_params() {
            Ok(equips) => equips,
            Err(err) if err.is_per_item() => {
                tracing::warn!(suit = suit.id(), error = %err, "skipped suit equipment");
                continue;
            }
            Err(err) => return Err(err),
        };
        for equip in equips {
            let entry = entry_for(&mut entries, equip)?;
            entry
                .suits
                .insert(suit.gradeless_id().to_string(), name.clone());
        }
    }

    let boxes = registry.table(tables::ITEM_GUNPLA_BOX)?;
    for row in boxes.all() {
        let kit = GunplaBox::from_row(row);
        let name = match kit.name_localized().and_then(|text| text.text()) {
            Ok(name) => name.to_string(),
            Err(err) if err.is_per_item() => continue,
            Err(err) => return Err(err),
        };
        let grade = kit.grade()?.to_string();
        let equips = match kit.equips() {
            Ok(equips) => equips,
            Err(err) if err.is_per_item() => {
                tracing::warn!(kit = kit.id(), error = %err, "skipped kit equipment");
                continue;
            }
            Err(err) => return Err(err),
        };
        for equip in equips {
            let entry = entry_for(&mut entries, equip)?;
            entry
                .kits
                .insert(kit.id().to_string(), (grade.clone(), name.clone()));
        }
    }

    Ok(entries)
}

fn entry_for<'e, 'r>(
    entries: &'e mut IndexMap<&'r str, Collected<'r>>,
    equip: EquipParameter<'r>,
) -> Result<&'e mut Collected<'r>> {
    // Left-hand equipment ids carry a trailing L; both hands share a page.
    let key = equip.parts_name()?.trim_end_matches('L');
    let entry = entries.entry(key).or_insert_with(|| Collected {
        equip,
        suits: IndexMap::new(),
        kits: IndexMap::new(),
    });
    entry.equip = equip;
    Ok(entry)
}

fn make_page(entry: &Collected<'_>, namespace: &str) -> Result<Page> {
    let name = entry.equip.name_localized()?.text()?.to_string();
    let data = EquipPageData {
        equip_type: entry.equip.category_kind()?.to_string(),
        skills: equip_skills(&entry.equip)?,
        suits: entry
            .suits
            .iter()
            .map(|(id, name)| (id.clone(), name.clone()))
            .collect(),
        kits: entry
            .kits
            .iter()
            .map(|(id, (grade, name))| (id.clone(), grade.clone(), name.clone()))
            .collect(),
        name,
    };
    let title = format!("{namespace}:{}", page_slug(&data.name));
    let content = wikitext::render_equip_page(&data);
    Ok(Page { title, content })
}
