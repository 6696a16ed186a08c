//! Per-agent accounts and end-of-cycle bounds enforcement.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use agora_types::ItemKind;

use crate::config::ScenarioConfig;

/// Every agent's current holdings, keyed by agent name then item kind.
///
/// Accounts are seeded from the scenario at construction: every agent gets
/// a slot for every tracked kind, endowed or zero. Mutations saturate
/// instead of overflowing, and silently skip kinds the scenario does not
/// track, so a stage never has to pre-check the item universe.
#[derive(Debug, Clone, Default)]
pub struct HoldingsBook {
    accounts: BTreeMap<String, BTreeMap<ItemKind, Decimal>>,
}

impl HoldingsBook {
    /// Seed accounts from a scenario's agents and tracked kinds.
    #[must_use]
    pub fn from_config(config: &ScenarioConfig) -> Self {
        let mut accounts = BTreeMap::new();
        for agent in &config.agents {
            let mut account = BTreeMap::new();
            for item in &config.items {
                let endowed = agent
                    .holdings
                    .get(&item.kind)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                account.insert(item.kind, endowed);
            }
            accounts.insert(agent.name.clone(), account);
        }
        Self { accounts }
    }

    /// Current holding, zero for unknown agents or untracked kinds.
    #[must_use]
    pub fn quantity(&self, agent: &str, kind: ItemKind) -> Decimal {
        self.accounts
            .get(agent)
            .and_then(|account| account.get(&kind))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Add to a holding. No-op for unknown agents or untracked kinds.
    pub fn credit(&mut self, agent: &str, kind: ItemKind, amount: Decimal) {
        if let Some(slot) = self.slot(agent, kind) {
            *slot = slot.saturating_add(amount);
        }
    }

    /// Subtract from a holding. No-op for unknown agents or untracked kinds.
    pub fn debit(&mut self, agent: &str, kind: ItemKind, amount: Decimal) {
        if let Some(slot) = self.slot(agent, kind) {
            *slot = slot.saturating_sub(amount);
        }
    }

    /// Clamp every holding into its configured bounds.
    ///
    /// Runs once at the end of each update cycle. Clamping happens after
    /// all stages so a mid-cycle excursion (an oversold skill, say) is
    /// visible to later stages before it is corrected.
    pub fn apply_bounds(&mut self, config: &ScenarioConfig) {
        for (agent, account) in &mut self.accounts {
            for (kind, value) in &mut *account {
                let Some(item) = config.item_config(*kind) else {
                    continue;
                };
                let clamped = item.clamp(*value);
                if clamped != *value {
                    debug!(agent = %agent, kind = %kind, from = %value, to = %clamped, "holding clamped");
                    *value = clamped;
                }
            }
        }
    }

    /// One agent's account, if known.
    #[must_use]
    pub fn account(&self, agent: &str) -> Option<&BTreeMap<ItemKind, Decimal>> {
        self.accounts.get(agent)
    }

    /// A deep copy of every account, for audit records.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, BTreeMap<ItemKind, Decimal>> {
        self.accounts.clone()
    }

    fn slot(&mut self, agent: &str, kind: ItemKind) -> Option<&mut Decimal> {
        self.accounts
            .get_mut(agent)
            .and_then(|account| account.get_mut(&kind))
    }
}
