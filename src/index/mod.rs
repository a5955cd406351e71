//! Derived indices precomputed while the registry loads.
//!
//! Each index encodes relationships the raw tables do not state explicitly.
//! They are built exactly once, immediately after their source table
//! registers, and never recomputed; the data snapshot is immutable.

pub mod ownership;
pub mod rewards;
pub mod synthesis;

pub use ownership::OwnershipIndex;
pub use rewards::{ClearGrade, MissionRewardIndex, RewardEntry};
pub use synthesis::{RecipeTriple, SynthesisIndex};
