//! Part-level synthesis recipes, reconstructed from suit-level recipes.
//!
//! The raw table maps a result suit to pairs of source suits. Because grade
//! variants share part ids across suits, the part-level recipes have to be
//! rebuilt: the result suit's six slots are zipped positionally against both
//! source suits' slots, and any triple whose target part equals either
//! source part is an artifact of slot sharing, not a real derivation.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::registry::{tables, Registry};
use crate::views::suit::Suit;
use crate::views::synthesis::SynthesisRecipe;

/// One validated part upgrade: `target` is produced from `source1` and
/// `source2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipeTriple {
    pub target: String,
    pub source1: String,
    pub source2: String,
}

pub struct SynthesisIndex {
    triples: Vec<RecipeTriple>,
    by_target: HashMap<String, Vec<usize>>,
    by_source: HashMap<String, Vec<usize>>,
}

impl SynthesisIndex {
    /// Runs once, when the DerivedSynthesizeParameter table registers; the
    /// MSList table must already be loaded.
    pub fn build(registry: &Registry) -> Result<Self> {
        let suits = registry.table(tables::MS_LIST)?;
        let recipes = registry.table(tables::DERIVED_SYNTHESIZE)?;

        let mut seen = HashSet::new();
        let mut triples = Vec::new();

        for row in recipes.all() {
            let recipe = SynthesisRecipe::from_row(row);
            // Recipes referencing suits absent from the export are skipped,
            // target and sources alike.
            let Some(target_row) = suits.try_by_id(recipe.target_parts_id()?) else {
                continue;
            };
            let target_slots = Suit::from_row(target_row).slot_ids()?;

            for (src1_id, src2_id) in recipe.recipe_pairs()? {
                let Some(src1_row) = suits.try_by_id(src1_id) else {
                    continue;
                };
                let Some(src2_row) = suits.try_by_id(src2_id) else {
                    continue;
                };
                let src1_slots = Suit::from_row(src1_row).slot_ids()?;
                let src2_slots = Suit::from_row(src2_row).slot_ids()?;

                for position in 0..target_slots.len() {
                    let (Some(target), Some(source1), Some(source2)) = (
                        target_slots[position],
                        src1_slots[position],
                        src2_slots[position],
                    ) else {
                        continue;
                    };
                    // Slot-sharing artifact: the "upgrade" would consume the
                    // part it produces.
                    if target == source1 || target == source2 {
                        continue;
                    }
                    let triple = RecipeTriple {
                        target: target.to_string(),
                        source1: source1.to_string(),
                        source2: source2.to_string(),
                    };
                    if seen.insert(triple.clone()) {
                        triples.push(triple);
                    }
                }
            }
        }

        let mut by_target: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_source: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, triple) in triples.iter().enumerate() {
            by_target.entry(triple.target.clone()).or_default().push(i);
            by_source.entry(triple.source1.clone()).or_default().push(i);
            if triple.source2 != triple.source1 {
                by_source.entry(triple.source2.clone()).or_default().push(i);
            }
        }

        Ok(Self {
            triples,
            by_target,
            by_source,
        })
    }

    /// All kept triples producing the part: what it derives from.
    pub fn find_derives_from(&self, part_id: &str) -> Vec<&RecipeTriple> {
        self.lookup(&self.by_target, part_id)
    }

    /// All kept triples consuming the part as either source: what it
    /// derives into.
    pub fn find_derives_into(&self, part_id: &str) -> Vec<&RecipeTriple> {
        self.lookup(&self.by_source, part_id)
    }

    fn lookup(&self, map: &HashMap<String, Vec<usize>>, part_id: &str) -> Vec<&RecipeTriple> {
        map.get(part_id)
            .map(|indices| indices.iter().map(|&i| &self.triples[i]).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeTriple> {
        self.triples.iter()
    }
}
