//! Working state for a single update cycle.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use agora_oracle::Transcript;
use agora_types::ItemKind;

/// Everything one event's processing accumulates before it is folded into
/// the engine: the shared oracle transcript, per-agent quantity deltas,
/// and the effect strings each stage emits.
///
/// Deltas are seeded at zero for every agent over the whole item universe,
/// tracked or not, so the vote and tax stages can read any slot without
/// caring which kinds the scenario tracks.
#[derive(Debug)]
pub struct CycleState {
    transcript: Transcript,
    deltas: BTreeMap<String, BTreeMap<ItemKind, Decimal>>,
    inventory_effects: Vec<String>,
    vote_effects: Vec<String>,
    tax_effects: Vec<String>,
}

impl CycleState {
    /// Fresh state for one event, with zeroed deltas for the given agents.
    pub fn new<'a>(agents: impl IntoIterator<Item = &'a str>) -> Self {
        let deltas = agents
            .into_iter()
            .map(|agent| {
                let zeroed = ItemKind::ALL
                    .into_iter()
                    .map(|kind| (kind, Decimal::ZERO))
                    .collect();
                (agent.to_owned(), zeroed)
            })
            .collect();
        Self {
            transcript: Transcript::new(),
            deltas,
            inventory_effects: Vec::new(),
            vote_effects: Vec::new(),
            tax_effects: Vec::new(),
        }
    }

    /// The shared oracle transcript.
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Mutable access for stages that push statements and questions.
    pub const fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    /// Accumulate a signed quantity change for one agent and kind.
    pub fn record_delta(&mut self, agent: &str, kind: ItemKind, change: Decimal) {
        if let Some(slot) = self
            .deltas
            .get_mut(agent)
            .and_then(|per_kind| per_kind.get_mut(&kind))
        {
            *slot = slot.saturating_add(change);
        }
    }

    /// Net change so far for one agent and kind.
    #[must_use]
    pub fn delta(&self, agent: &str, kind: ItemKind) -> Decimal {
        self.deltas
            .get(agent)
            .and_then(|per_kind| per_kind.get(&kind))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// The transcript line restating one agent's delta for a kind.
    ///
    /// The vote and tax stages replay these to the oracle so it reasons
    /// from the cycle's structured outcome, not from the raw event prose.
    #[must_use]
    pub fn delta_statement(&self, agent: &str, kind: ItemKind) -> String {
        format!(
            "The inventory of {kind} of {agent} changed as the following: {}",
            self.delta(agent, kind).normalize()
        )
    }

    /// Record an inventory effect string.
    pub fn note_inventory_effect(&mut self, effect: impl Into<String>) {
        self.inventory_effects.push(effect.into());
    }

    /// Record a vote effect string.
    pub fn note_vote_effect(&mut self, effect: impl Into<String>) {
        self.vote_effects.push(effect.into());
    }

    /// Record a tax effect string.
    pub fn note_tax_effect(&mut self, effect: impl Into<String>) {
        self.tax_effects.push(effect.into());
    }

    /// Inventory effects recorded so far.
    #[must_use]
    pub fn inventory_effects(&self) -> &[String] {
        &self.inventory_effects
    }

    /// Vote effects recorded so far.
    #[must_use]
    pub fn vote_effects(&self) -> &[String] {
        &self.vote_effects
    }

    /// Tax effects recorded so far.
    #[must_use]
    pub fn tax_effects(&self) -> &[String] {
        &self.tax_effects
    }

    /// Tear down into the three effect lists, in emission order.
    #[must_use]
    pub fn into_effects(self) -> (Vec<String>, Vec<String>, Vec<String>) {
        (self.inventory_effects, self.vote_effects, self.tax_effects)
    }
}
