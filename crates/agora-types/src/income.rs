//! Running income counters for the three credited activities.
//!
//! Income accumulates across the whole run and is never reset. It feeds the
//! state summary and the per-update audit record; it does not feed the tax
//! base, which uses the per-cycle money delta instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An activity whose proceeds are counted as income.
///
/// Trades credit income on the buy side only: the counter tracks money
/// spent into each market, not money received from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IncomeKind {
    /// Money spent buying houses.
    #[serde(rename = "house trade")]
    HouseTrade,
    /// Money earned building houses.
    #[serde(rename = "house build")]
    HouseBuild,
    /// Money spent buying skills.
    #[serde(rename = "skill trade")]
    SkillTrade,
}

impl IncomeKind {
    /// Every income kind, in summary order.
    pub const ALL: [Self; 3] = [Self::HouseTrade, Self::HouseBuild, Self::SkillTrade];

    /// Wire name, as rendered in summaries and audit records.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HouseTrade => "house trade",
            Self::HouseBuild => "house build",
            Self::SkillTrade => "skill trade",
        }
    }
}

impl core::fmt::Display for IncomeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated totals per income kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTotals {
    house_trade: Decimal,
    house_build: Decimal,
    skill_trade: Decimal,
}

impl IncomeTotals {
    /// The accumulated total for one kind.
    pub const fn amount(&self, kind: IncomeKind) -> Decimal {
        match kind {
            IncomeKind::HouseTrade => self.house_trade,
            IncomeKind::HouseBuild => self.house_build,
            IncomeKind::SkillTrade => self.skill_trade,
        }
    }

    /// Add to one kind's total.
    pub fn credit(&mut self, kind: IncomeKind, amount: Decimal) {
        let slot = match kind {
            IncomeKind::HouseTrade => &mut self.house_trade,
            IncomeKind::HouseBuild => &mut self.house_build,
            IncomeKind::SkillTrade => &mut self.skill_trade,
        };
        *slot = slot.saturating_add(amount);
    }
}
