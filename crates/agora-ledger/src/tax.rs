//! Tax assessment and redistribution.
//!
//! Each cycle the planner proposes a tax per agent, reasoning from every
//! agent's money delta. The resolution chain exempts losses, clamps valid
//! proposals to income, and falls back to a 30% levy when the planner
//! declines or answers nonsense. Only the fallback levy is actually
//! deducted from money holdings; an assessed proposal stays on the books
//! without moving money. Collected tax then flows back into raw resources
//! according to the governance scheme, in whole units.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use agora_types::{BordaTally, Governance, ItemKind, RewardPhilosophy, VoteState};

use crate::holdings::HoldingsBook;

/// The outcome of resolving one agent's tax proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxResolution {
    /// No tax due: the agent earned nothing or lost money this cycle.
    Exempt,
    /// A planner proposal on record, clamped to income. Nothing is
    /// deducted from holdings.
    Assessed(Decimal),
    /// The fallback levy of 30% of income, deducted from money holdings.
    Deducted(Decimal),
}

impl TaxResolution {
    /// The tax amount this resolution puts on the books.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        match self {
            Self::Exempt => Decimal::ZERO,
            Self::Assessed(amount) | Self::Deducted(amount) => amount,
        }
    }
}

/// Resolve a planner proposal against an agent's money delta for the cycle.
///
/// In order: a negative income is exempt; a parsed proposal greater than
/// zero is assessed at no more than the income; a positive income with no
/// usable proposal draws the fallback levy; a zero income is exempt.
#[must_use]
pub fn resolve_tax(proposal: Option<Decimal>, income: Decimal) -> TaxResolution {
    if income < Decimal::ZERO {
        return TaxResolution::Exempt;
    }
    if let Some(amount) = proposal {
        if amount > Decimal::ZERO {
            return TaxResolution::Assessed(amount.min(income));
        }
    }
    if income > Decimal::ZERO {
        let levy = income.saturating_mul(Decimal::new(3, 1));
        return TaxResolution::Deducted(levy);
    }
    TaxResolution::Exempt
}

/// The tax effect string for one agent.
#[must_use]
pub fn tax_effect(agent: &str, amount: Decimal) -> String {
    format!("[effect on {agent}'s Tax] is equal to {}", amount.normalize())
}

/// The planner's tax question for one agent, framed by the philosophy.
#[must_use]
pub fn tax_question(philosophy: RewardPhilosophy, agent: &str, income: Decimal) -> String {
    let concern = match philosophy {
        RewardPhilosophy::Productivity => {
            "You care about the overall productivity of the city: setting a \
             high tax for a high earner may discourage them from working \
             harder in the future."
        }
        RewardPhilosophy::Equality => {
            "You care about the overall equality of the city: someone who \
             earns more than the others should pay a high tax, so that \
             wealth spreads as evenly as possible."
        }
    };
    let earned = income.normalize();
    format!(
        "You are the central social planner of this city, responsible for \
         setting each individual's due tax from their income compared to \
         the others. {concern} Considering all of this and the incomes \
         above, how much tax do you set for {agent}, who earned {earned}? \
         The value has to be less than the actual income. If {agent}'s \
         income is less than zero, answer 0. If you cannot answer, answer 0."
    )
}

// ---------------------------------------------------------------------------
// Redistribution
// ---------------------------------------------------------------------------

/// Inputs for one cycle's redistribution pass.
#[derive(Debug)]
pub struct Redistribution<'a> {
    /// The governance scheme selecting the split rule.
    pub governance: Governance,
    /// All agents, in roster order.
    pub roster: &'a [String],
    /// Each agent's tax as resolved this cycle.
    pub taxes: &'a BTreeMap<String, Decimal>,
    /// The vote state after this cycle's vote stage.
    pub votes: &'a VoteState,
    /// The Borda tally after this cycle's vote stage.
    pub borda: BordaTally,
}

/// Return collected tax to inventories as whole units of raw resources.
///
/// Fully libertarian: each agent's own tax comes back to them, split by
/// their own rank scores out of 3. Semi-libertarian: a sixth of the pooled
/// tax goes to every agent, split by the Borda tally's weights. Fully
/// utilitarian: a sixth of the pooled tax goes to every agent, split by
/// the planner's shared rank out of 3. Shares are floored to whole units;
/// the remainder is not redistributed.
pub fn redistribute(policy: &Redistribution<'_>, holdings: &mut HoldingsBook) {
    let three = Decimal::from(3_u8);

    match policy.governance {
        Governance::FullLibertarian => {
            for agent in policy.roster {
                let tax = tax_of(policy.taxes, agent);
                let rank = policy.votes.rank_of(agent).unwrap_or_default();
                credit_split(
                    holdings,
                    agent,
                    tax,
                    [
                        u64::from(rank.wood()),
                        u64::from(rank.stone()),
                        u64::from(rank.iron()),
                    ],
                    three,
                );
            }
        }
        Governance::SemiLibertarianUtilitarian => {
            let pool = pooled_share(policy.taxes);
            let weight_total = Decimal::from(policy.borda.total());
            if weight_total.is_zero() {
                warn!("borda tally is empty; skipping redistribution");
                return;
            }
            for agent in policy.roster {
                credit_split(
                    holdings,
                    agent,
                    pool,
                    [
                        policy.borda.wood(),
                        policy.borda.stone(),
                        policy.borda.iron(),
                    ],
                    weight_total,
                );
            }
        }
        Governance::FullUtilitarian => {
            let pool = pooled_share(policy.taxes);
            let rank = policy.votes.shared_rank().unwrap_or_default();
            for agent in policy.roster {
                credit_split(
                    holdings,
                    agent,
                    pool,
                    [
                        u64::from(rank.wood()),
                        u64::from(rank.stone()),
                        u64::from(rank.iron()),
                    ],
                    three,
                );
            }
        }
    }
}

fn tax_of(taxes: &BTreeMap<String, Decimal>, agent: &str) -> Decimal {
    taxes.get(agent).copied().unwrap_or(Decimal::ZERO)
}

/// A sixth of the total collected tax.
fn pooled_share(taxes: &BTreeMap<String, Decimal>) -> Decimal {
    let total = taxes
        .values()
        .fold(Decimal::ZERO, |sum, tax| sum.saturating_add(*tax));
    total
        .checked_div(Decimal::from(6_u8))
        .unwrap_or(Decimal::ZERO)
}

/// Credit wood, stone, and iron as `floor(base * weight / denominator)`.
fn credit_split(
    holdings: &mut HoldingsBook,
    agent: &str,
    base: Decimal,
    weights: [u64; 3],
    denominator: Decimal,
) {
    let [wood, stone, iron] = weights;
    for (kind, weight) in [
        (ItemKind::Wood, wood),
        (ItemKind::Stone, stone),
        (ItemKind::Iron, iron),
    ] {
        let share = base
            .saturating_mul(Decimal::from(weight))
            .checked_div(denominator)
            .unwrap_or(Decimal::ZERO)
            .floor();
        holdings.credit(agent, kind, share);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{AgentEndowment, ScenarioConfig};
    use agora_types::Rank;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn fixture() -> (Vec<String>, HoldingsBook) {
        let config = ScenarioConfig {
            agents: vec![AgentEndowment::new("Alice"), AgentEndowment::new("Bob")],
            ..ScenarioConfig::default()
        };
        let roster = config.agent_names().map(str::to_owned).collect();
        (roster, HoldingsBook::from_config(&config))
    }

    #[test]
    fn losses_and_flat_cycles_are_exempt() {
        assert_eq!(resolve_tax(None, dec(-4)), TaxResolution::Exempt);
        assert_eq!(resolve_tax(Some(dec(5)), dec(-4)), TaxResolution::Exempt);
        assert_eq!(resolve_tax(None, Decimal::ZERO), TaxResolution::Exempt);
    }

    #[test]
    fn valid_proposal_is_clamped_to_income() {
        assert_eq!(
            resolve_tax(Some(dec(50)), dec(10)),
            TaxResolution::Assessed(dec(10))
        );
        assert_eq!(
            resolve_tax(Some(dec(4)), dec(10)),
            TaxResolution::Assessed(dec(4))
        );
    }

    #[test]
    fn unusable_proposal_draws_the_fallback_levy() {
        assert_eq!(
            resolve_tax(None, dec(10)),
            TaxResolution::Deducted(dec(3))
        );
        assert_eq!(
            resolve_tax(Some(Decimal::ZERO), dec(10)),
            TaxResolution::Deducted(dec(3))
        );
        assert_eq!(
            resolve_tax(Some(dec(-2)), dec(10)),
            TaxResolution::Deducted(dec(3))
        );
    }

    #[test]
    fn effect_string_normalizes_the_amount() {
        assert_eq!(
            tax_effect("Alice", Decimal::new(450, 2)),
            "[effect on Alice's Tax] is equal to 4.5"
        );
        assert_eq!(
            tax_effect("Bob", Decimal::ZERO),
            "[effect on Bob's Tax] is equal to 0"
        );
    }

    #[test]
    fn question_framing_follows_the_philosophy() {
        let productivity = tax_question(RewardPhilosophy::Productivity, "Alice", dec(12));
        assert!(productivity.contains("productivity"));
        assert!(productivity.contains("who earned 12"));

        let equality = tax_question(RewardPhilosophy::Equality, "Bob", Decimal::new(-25, 1));
        assert!(equality.contains("equality"));
        assert!(equality.contains("who earned -2.5"));
    }

    #[test]
    fn libertarian_split_returns_own_tax_by_own_rank() {
        let (roster, mut holdings) = fixture();
        let mut taxes = BTreeMap::new();
        taxes.insert("Alice".to_owned(), dec(9));
        taxes.insert("Bob".to_owned(), dec(10));
        let mut votes = VoteState::per_agent(roster.iter().map(String::as_str));
        votes.set_rank("Bob", Rank::parse("iron, stone, wood").unwrap());

        redistribute(
            &Redistribution {
                governance: Governance::FullLibertarian,
                roster: &roster,
                taxes: &taxes,
                votes: &votes,
                borda: BordaTally::default(),
            },
            &mut holdings,
        );

        // Alice: 9 * (2,1,0) / 3 = (6, 3, 0).
        assert_eq!(holdings.quantity("Alice", ItemKind::Wood), dec(6));
        assert_eq!(holdings.quantity("Alice", ItemKind::Stone), dec(3));
        assert_eq!(holdings.quantity("Alice", ItemKind::Iron), Decimal::ZERO);
        // Bob: 10 * (0,1,2) / 3 floored = (0, 3, 6).
        assert_eq!(holdings.quantity("Bob", ItemKind::Wood), Decimal::ZERO);
        assert_eq!(holdings.quantity("Bob", ItemKind::Stone), dec(3));
        assert_eq!(holdings.quantity("Bob", ItemKind::Iron), dec(6));
    }

    #[test]
    fn semi_libertarian_split_follows_the_borda_tally() {
        let (roster, mut holdings) = fixture();
        let mut taxes = BTreeMap::new();
        taxes.insert("Alice".to_owned(), dec(36));
        taxes.insert("Bob".to_owned(), dec(24));
        let votes = VoteState::per_agent(roster.iter().map(String::as_str));
        let mut borda = BordaTally::default();
        borda.accumulate(Rank::default());
        borda.accumulate(Rank::parse("wood, iron, stone").unwrap());

        redistribute(
            &Redistribution {
                governance: Governance::SemiLibertarianUtilitarian,
                roster: &roster,
                taxes: &taxes,
                votes: &votes,
                borda,
            },
            &mut holdings,
        );

        // Pool = 60 / 6 = 10; weights (4, 1, 1) over 6.
        for agent in &roster {
            assert_eq!(holdings.quantity(agent, ItemKind::Wood), dec(6));
            assert_eq!(holdings.quantity(agent, ItemKind::Stone), dec(1));
            assert_eq!(holdings.quantity(agent, ItemKind::Iron), dec(1));
        }
    }

    #[test]
    fn empty_borda_tally_skips_redistribution() {
        let (roster, mut holdings) = fixture();
        let mut taxes = BTreeMap::new();
        taxes.insert("Alice".to_owned(), dec(36));
        let votes = VoteState::per_agent(roster.iter().map(String::as_str));

        redistribute(
            &Redistribution {
                governance: Governance::SemiLibertarianUtilitarian,
                roster: &roster,
                taxes: &taxes,
                votes: &votes,
                borda: BordaTally::default(),
            },
            &mut holdings,
        );

        assert_eq!(holdings.quantity("Alice", ItemKind::Wood), Decimal::ZERO);
    }

    #[test]
    fn utilitarian_split_follows_the_shared_rank() {
        let (roster, mut holdings) = fixture();
        let mut taxes = BTreeMap::new();
        taxes.insert("Alice".to_owned(), dec(7));
        taxes.insert("Bob".to_owned(), dec(5));
        let mut votes = VoteState::shared();
        votes.set_shared(Rank::parse("stone, wood, iron").unwrap());

        redistribute(
            &Redistribution {
                governance: Governance::FullUtilitarian,
                roster: &roster,
                taxes: &taxes,
                votes: &votes,
                borda: BordaTally::default(),
            },
            &mut holdings,
        );

        // Pool = 12 / 6 = 2; shares floor(2 * (1,2,0) / 3) = (0, 1, 0).
        for agent in &roster {
            assert_eq!(holdings.quantity(agent, ItemKind::Wood), Decimal::ZERO);
            assert_eq!(holdings.quantity(agent, ItemKind::Stone), dec(1));
            assert_eq!(holdings.quantity(agent, ItemKind::Iron), Decimal::ZERO);
        }
    }
}
