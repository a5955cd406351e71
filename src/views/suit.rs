//! MSList row view: a suit configuration with six body-slot parts, eight
//! equipment slots and an optional synthesis recipe keyed by its own id.

use crate::error::Result;
use crate::registry::{tables, Row};
use crate::views::equip::EquipParameter;
use crate::views::part::PartParameter;
use crate::views::synthesis::SynthesisRecipe;
use crate::views::text::TextRow;

/// The six body part slots, in the export's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySlot {
    Head,
    Body,
    ArmR,
    ArmL,
    Leg,
    Backpack,
}

impl BodySlot {
    pub const ALL: [BodySlot; 6] = [
        BodySlot::Head,
        BodySlot::Body,
        BodySlot::ArmR,
        BodySlot::ArmL,
        BodySlot::Leg,
        BodySlot::Backpack,
    ];

    /// Raw record key for this slot.
    pub fn raw_key(self) -> &'static str {
        match self {
            BodySlot::Head => "_head",
            BodySlot::Body => "_body",
            BodySlot::ArmR => "_armR",
            BodySlot::ArmL => "_armL",
            BodySlot::Leg => "_leg",
            BodySlot::Backpack => "_backpack",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BodySlot::Head => "Head",
            BodySlot::Body => "Body",
            BodySlot::ArmR => "ArmR",
            BodySlot::ArmL => "ArmL",
            BodySlot::Leg => "Leg",
            BodySlot::Backpack => "Backpack",
        }
    }
}

const EQUIP_KEYS: [&str; 8] = [
    "_equip0", "_equip1", "_equip2", "_equip3", "_equip4", "_equip5", "_equip6", "_equip7",
];

/// Which grade variants of a suit exist in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeVariants {
    pub has_hg: bool,
    pub has_mg: bool,
    pub has_sd: bool,
}

/// Strip the three-character grade prefix (`HG_`, `MG_`, `SD_`) off a suit
/// id. Ids shorter than the prefix come back unchanged.
pub fn gradeless(id: &str) -> &str {
    id.get(3..).unwrap_or(id)
}

#[derive(Clone, Copy, Debug)]
pub struct Suit<'r>(Row<'r>);

impl<'r> Suit<'r> {
    pub fn from_row(row: Row<'r>) -> Self {
        Self(row)
    }

    pub fn row(&self) -> Row<'r> {
        self.0
    }

    pub fn id(&self) -> &'r str {
        self.0.id()
    }

    /// Grade prefix of the suit id, e.g. `HG_`.
    pub fn grade(&self) -> &'r str {
        self.id().get(..3).unwrap_or(self.id())
    }

    pub fn gradeless_id(&self) -> &'r str {
        gradeless(self.id())
    }

    /// Part id in one body slot, or no value for the `"None"` sentinel.
    pub fn slot_id(&self, slot: BodySlot) -> Result<Option<&'r str>> {
        let id = self.0.str_field(slot.raw_key())?;
        Ok((id != crate::registry::NONE_SENTINEL).then_some(id))
    }

    /// All six body-slot part ids in slot order.
    pub fn slot_ids(&self) -> Result<[Option<&'r str>; 6]> {
        let mut slots = [None; 6];
        for (i, slot) in BodySlot::ALL.into_iter().enumerate() {
            slots[i] = self.slot_id(slot)?;
        }
        Ok(slots)
    }

    /// The suit's display name text.
    pub fn name_localized(&self) -> Result<TextRow<'r>> {
        Ok(TextRow::from_row(
            self.0.id_reference(tables::TEXT_PRESET_CHARACTER_NAME)?,
        ))
    }

    /// The suit's model number text.
    pub fn number_localized(&self) -> Result<TextRow<'r>> {
        Ok(TextRow::from_row(self.0.id_reference(tables::TEXT_MS_NUMBER)?))
    }

    /// Parameter row for the part in one body slot.
    pub fn part_params(&self, slot: BodySlot) -> Result<Option<PartParameter<'r>>> {
        Ok(self
            .0
            .reference(slot.raw_key(), tables::PARTS_PARAMETER)?
            .map(PartParameter::from_row))
    }

    /// Display name text for the part in one body slot.
    pub fn part_name_localized(&self, slot: BodySlot) -> Result<Option<TextRow<'r>>> {
        Ok(self
            .0
            .reference(slot.raw_key(), tables::TEXT_PARTS_NAME)?
            .map(TextRow::from_row))
    }

    /// Parameter row for one of the eight equipment slots.
    pub fn equip_params(&self, slot: usize) -> Result<Option<EquipParameter<'r>>> {
        Ok(self
            .0
            .reference(EQUIP_KEYS[slot], tables::EQUIP_PARAMETER)?
            .map(EquipParameter::from_row))
    }

    /// All occupied equipment slots, in slot order.
    pub fn all_equip_params(&self) -> Result<Vec<EquipParameter<'r>>> {
        let mut equips = Vec::new();
        for slot in 0..EQUIP_KEYS.len() {
            if let Some(equip) = self.equip_params(slot)? {
                equips.push(equip);
            }
        }
        Ok(equips)
    }

    /// The suit's synthesis recipe row, keyed by its own id. Most suits do
    /// not have one.
    pub fn synthesis(&self) -> Result<Option<SynthesisRecipe<'r>>> {
        Ok(self
            .0
            .id_reference_opt(tables::DERIVED_SYNTHESIZE)?
            .map(SynthesisRecipe::from_row))
    }

    /// Which grade variants exist for this suit's gradeless id.
    pub fn grade_variants(&self) -> Result<GradeVariants> {
        let suits = self.0.registry().table(tables::MS_LIST)?;
        let suffix = self.gradeless_id();
        Ok(GradeVariants {
            has_hg: suits.contains(&format!("HG_{suffix}")),
            has_mg: suits.contains(&format!("MG_{suffix}")),
            has_sd: suits.contains(&format!("SD_{suffix}")),
        })
    }
}
