//! Suit/part ownership: which suits contain a part, and which one owns it.
//!
//! Distinct suit rows share part ids across grade variants of essentially
//! the same suit, so "the suit this part belongs to" needs reconciliation:
//! a part owned by exactly one suit is trivially owned; a shared part goes
//! to the first owner, in enumeration order, whose gradeless suit id occurs
//! inside the part id.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{DataError, Result};
use crate::registry::{tables, Registry};
use crate::views::suit::{gradeless, BodySlot, Suit};

/// Pseudo table names used for index lookup failures.
const OWNERS: &str = "suit part owners";
const PRIMARY: &str = "suit primary owners";

pub struct OwnershipIndex {
    /// Part id -> owning suit ids, in enumeration order.
    owners: IndexMap<String, Vec<String>>,
    /// Part id -> the single canonical owner. Parts whose shared owners all
    /// fail the substring heuristic have no entry; `primary_owner_of` then
    /// reports the part as not found rather than guessing a tie-break.
    primary: HashMap<String, String>,
}

impl OwnershipIndex {
    /// Enumerate every `(suit, part)` pair across all suits' body slots and
    /// resolve primary owners. Runs once, when the MSList table registers.
    pub fn build(registry: &Registry) -> Result<Self> {
        let suits = registry.table(tables::MS_LIST)?;

        let mut owners: IndexMap<String, Vec<String>> = IndexMap::new();
        for row in suits.all() {
            let suit = Suit::from_row(row);
            for slot in BodySlot::ALL {
                if let Some(part_id) = suit.slot_id(slot)? {
                    owners
                        .entry(part_id.to_string())
                        .or_default()
                        .push(suit.id().to_string());
                }
            }
        }

        let mut primary = HashMap::new();
        for (part_id, suit_ids) in &owners {
            if suit_ids.len() == 1 {
                primary.insert(part_id.clone(), suit_ids[0].clone());
                continue;
            }
            let matched = suit_ids.iter().find(|suit_id| {
                let suffix = gradeless(suit_id);
                !suffix.is_empty() && part_id.contains(suffix)
            });
            match matched {
                Some(suit_id) => {
                    primary.insert(part_id.clone(), suit_id.clone());
                }
                None => {
                    tracing::debug!(%part_id, "no shared owner matched the part id");
                }
            }
        }

        Ok(Self { owners, primary })
    }

    /// Ids of every suit containing the part. Fails if the part was never
    /// observed in any suit's slots.
    pub fn owner_ids(&self, part_id: &str) -> Result<&[String]> {
        self.owners
            .get(part_id)
            .map(Vec::as_slice)
            .ok_or_else(|| DataError::RowNotFound {
                table: OWNERS.to_string(),
                id: part_id.to_string(),
            })
    }

    /// Id of the canonical owner. Fails if the part was never observed or
    /// no primary was resolved for it.
    pub fn primary_owner_id(&self, part_id: &str) -> Result<&str> {
        self.primary
            .get(part_id)
            .map(String::as_str)
            .ok_or_else(|| DataError::RowNotFound {
                table: PRIMARY.to_string(),
                id: part_id.to_string(),
            })
    }

    /// Every suit containing the part, resolved against the registry.
    pub fn owners_of<'r>(&self, registry: &'r Registry, part_id: &str) -> Result<Vec<Suit<'r>>> {
        let suits = registry.table(tables::MS_LIST)?;
        self.owner_ids(part_id)?
            .iter()
            .map(|id| Ok(Suit::from_row(suits.by_id(id)?)))
            .collect()
    }

    /// The canonical owning suit, resolved against the registry.
    pub fn primary_owner_of<'r>(&self, registry: &'r Registry, part_id: &str) -> Result<Suit<'r>> {
        let suits = registry.table(tables::MS_LIST)?;
        Ok(Suit::from_row(suits.by_id(self.primary_owner_id(part_id)?)?))
    }
}
