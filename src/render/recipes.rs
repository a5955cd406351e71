//! Part-level synthesis recipe listings.

use crate::error::Result;
use crate::registry::{tables, Registry};
use crate::views::TextRow;

/// Named recipes consuming a part, one line per recipe:
/// `<target> <= <source 1> + <source 2>`, each part shown as id and name.
pub fn derives_into_listing(registry: &Registry, part_id: &str) -> Result<String> {
    let index = registry.synthesis()?;
    let names = registry.table(tables::TEXT_PARTS_NAME)?;
    let name_of = |id: &str| -> Result<String> {
        let text = TextRow::from_row(names.by_id(id)?).text()?;
        Ok(format!("{id} {text}"))
    };

    let mut lines = Vec::new();
    for triple in index.find_derives_into(part_id) {
        lines.push(format!(
            "{} <= {} + {}",
            name_of(&triple.target)?,
            name_of(&triple.source1)?,
            name_of(&triple.source2)?,
        ));
    }
    Ok(lines.join("\n"))
}
