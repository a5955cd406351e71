//! Typed row views over the loaded tables.
//!
//! Each view is a cheap `Copy` wrapper around a [`crate::registry::Row`]
//! exposing the raw-key mappings and declared references for one table. The
//! mappings are static; there is no runtime field-name derivation.

pub mod equip;
pub mod kit;
pub mod mission;
pub mod part;
pub mod skill;
pub mod suit;
pub mod synthesis;
pub mod text;

pub use equip::EquipParameter;
pub use kit::{GunplaBox, ShopListing};
pub use mission::MissionEntry;
pub use part::PartParameter;
pub use skill::SkillInfo;
pub use suit::{BodySlot, GradeVariants, Suit};
pub use synthesis::SynthesisRecipe;
pub use text::TextRow;
