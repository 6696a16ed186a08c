//! The per-update audit record.
//!
//! One record is appended to the engine's history for every processed event.
//! Records are self-contained: they snapshot the post-update economic state
//! and carry both the effect strings and the full oracle transcript, so a
//! cycle can be audited without replaying it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::UpdateId;
use crate::income::IncomeTotals;
use crate::item::ItemKind;
use crate::rank::VoteState;

/// The audit record for one processed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecord {
    /// Time-ordered record identifier.
    pub id: UpdateId,

    /// When the event was processed, from the engine's clock.
    pub recorded_at: DateTime<Utc>,

    /// Income totals after this update.
    pub income: IncomeTotals,

    /// Every agent's holdings after this update.
    pub inventories: BTreeMap<String, BTreeMap<ItemKind, Decimal>>,

    /// The vote state after this update.
    pub votes: VoteState,

    /// Each agent's tax as computed this cycle.
    pub taxes: BTreeMap<String, Decimal>,

    /// Inventory effect strings, tagged `[effect on {agent}'s Inventory]`.
    pub inventory_effects: Vec<String>,

    /// Vote effect strings, tagged `[effect on {agent}'s Vote]` or
    /// `[effect on central social planner's Vote]`.
    pub vote_effects: Vec<String>,

    /// Tax effect strings, tagged `[effect on {agent}'s Tax]`.
    pub tax_effects: Vec<String>,

    /// The full oracle transcript for the cycle, one line per entry.
    pub transcript: Vec<String>,
}

impl UpdateRecord {
    /// All effect strings in application order: inventory, vote, tax.
    pub fn all_effects(&self) -> impl Iterator<Item = &str> {
        self.inventory_effects
            .iter()
            .chain(&self.vote_effects)
            .chain(&self.tax_effects)
            .map(String::as_str)
    }
}
