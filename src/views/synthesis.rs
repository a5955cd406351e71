//! DerivedSynthesizeParameter row view: suit-level synthesis recipes.

use serde_json::Value;

use crate::error::{DataError, Result};
use crate::registry::Row;

#[derive(Clone, Copy, Debug)]
pub struct SynthesisRecipe<'r>(Row<'r>);

impl<'r> SynthesisRecipe<'r> {
    pub fn from_row(row: Row<'r>) -> Self {
        Self(row)
    }

    pub fn row(&self) -> Row<'r> {
        self.0
    }

    pub fn id(&self) -> &'r str {
        self.0.id()
    }

    /// The suit id this recipe produces.
    pub fn target_parts_id(&self) -> Result<&'r str> {
        self.0.str_field("_TargetPartsId")
    }

    /// The declared `(source suit 1, source suit 2)` pairs.
    pub fn recipe_pairs(&self) -> Result<Vec<(&'r str, &'r str)>> {
        self.0
            .list_field("_SynthesizeRecipeArray")?
            .iter()
            .map(|entry| {
                let src1 = entry.get("_SrcPartsId1").and_then(Value::as_str);
                let src2 = entry.get("_SrcPartsId2").and_then(Value::as_str);
                match (src1, src2) {
                    (Some(a), Some(b)) => Ok((a, b)),
                    _ => Err(DataError::FieldShape {
                        table: self.0.table_name().to_string(),
                        id: self.0.id().to_string(),
                        field: "_SynthesizeRecipeArray",
                        expected: "a list of records with two source part ids",
                    }),
                }
            })
            .collect()
    }
}
