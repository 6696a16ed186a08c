//! Shared type definitions for the Agora economy engine.
//!
//! This crate is the single source of truth for the data model shared by the
//! oracle and ledger crates: the closed item universe, governance policy
//! enums, ranked-vote types, income counters, and the audit record.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers
//! - [`item`] -- Item kinds, categories, build recipes, and holding bounds
//! - [`policy`] -- Governance schemes and reward philosophies
//! - [`rank`] -- Ranked preferences and the Borda tally
//! - [`income`] -- Running income counters
//! - [`record`] -- The per-update audit record

pub mod ids;
pub mod income;
pub mod item;
pub mod policy;
pub mod rank;
pub mod record;

// Re-export all public types at crate root for convenience.
pub use ids::UpdateId;
pub use income::{IncomeKind, IncomeTotals};
pub use item::{HouseColor, ItemCategory, ItemKind, ItemTypeConfig};
pub use policy::{Governance, RewardPhilosophy};
pub use rank::{BordaTally, Rank, VoteState};
pub use record::UpdateRecord;
