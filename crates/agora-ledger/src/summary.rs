//! State summaries: per-agent inventory lines and income totals.
//!
//! Rendering is noun-aware. Count nouns show whole numbers with an English
//! plural ("3 woods", "1 red house"); mass nouns show the plain quantity
//! ("2.5 money"). The classification comes from the oracle once, at engine
//! construction.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use agora_oracle::NounClass;
use agora_types::{IncomeKind, IncomeTotals, ItemKind};

use crate::config::ScenarioConfig;
use crate::holdings::HoldingsBook;

/// Render one quantity with its kind name.
#[must_use]
pub fn format_holding(kind: ItemKind, quantity: Decimal, class: NounClass) -> String {
    match class {
        NounClass::Count => {
            let count = quantity.trunc().normalize();
            if count == Decimal::ONE {
                format!("{count} {kind}")
            } else {
                format!("{count} {kind}s")
            }
        }
        NounClass::Mass => format!("{} {kind}", quantity.normalize()),
    }
}

/// One agent's inventory line, tracked kinds in canonical order.
#[must_use]
pub fn inventory_line(
    agent: &str,
    holdings: &HoldingsBook,
    config: &ScenarioConfig,
    nouns: &BTreeMap<ItemKind, NounClass>,
) -> String {
    let rendered: Vec<String> = ItemKind::ALL
        .into_iter()
        .filter(|kind| config.tracks(*kind))
        .map(|kind| {
            let class = nouns.get(&kind).copied().unwrap_or(NounClass::Mass);
            format_holding(kind, holdings.quantity(agent, kind), class)
        })
        .collect();
    format!("{agent}'s inventory: {}", rendered.join(", "))
}

/// The running income totals line appended to the state summary.
#[must_use]
pub fn income_line(income: &IncomeTotals) -> String {
    let rendered: Vec<String> = IncomeKind::ALL
        .into_iter()
        .map(|kind| format!("{kind}: {}", income.amount(kind).normalize()))
        .collect();
    format!("Accumulated income: {}", rendered.join(", "))
}

/// The full state summary: one inventory line per agent, then income.
#[must_use]
pub fn render_state(
    roster: &[String],
    holdings: &HoldingsBook,
    config: &ScenarioConfig,
    nouns: &BTreeMap<ItemKind, NounClass>,
    income: &IncomeTotals,
) -> String {
    let mut lines: Vec<String> = roster
        .iter()
        .map(|agent| inventory_line(agent, holdings, config, nouns))
        .collect();
    lines.push(income_line(income));
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::AgentEndowment;

    fn nouns() -> BTreeMap<ItemKind, NounClass> {
        let mut nouns = BTreeMap::new();
        for kind in ItemKind::ALL {
            let class = if kind == ItemKind::Money {
                NounClass::Mass
            } else {
                NounClass::Count
            };
            nouns.insert(kind, class);
        }
        nouns
    }

    #[test]
    fn count_nouns_pluralize_except_at_one() {
        assert_eq!(
            format_holding(ItemKind::Wood, Decimal::new(3, 0), NounClass::Count),
            "3 woods"
        );
        assert_eq!(
            format_holding(ItemKind::RedHouse, Decimal::ONE, NounClass::Count),
            "1 red house"
        );
        assert_eq!(
            format_holding(ItemKind::Stone, Decimal::ZERO, NounClass::Count),
            "0 stones"
        );
        // Count nouns render whole units only.
        assert_eq!(
            format_holding(ItemKind::Iron, Decimal::new(25, 1), NounClass::Count),
            "2 irons"
        );
    }

    #[test]
    fn mass_nouns_keep_the_plain_quantity() {
        assert_eq!(
            format_holding(ItemKind::Money, Decimal::new(125, 1), NounClass::Mass),
            "12.5 money"
        );
        assert_eq!(
            format_holding(ItemKind::Money, Decimal::new(-50, 1), NounClass::Mass),
            "-5 money"
        );
    }

    #[test]
    fn inventory_line_visits_tracked_kinds_in_order() {
        let config = ScenarioConfig {
            items: vec![
                agora_types::ItemTypeConfig::unbounded(ItemKind::Money),
                agora_types::ItemTypeConfig::counted(ItemKind::Wood),
                agora_types::ItemTypeConfig::counted(ItemKind::Stone),
            ],
            agents: vec![
                AgentEndowment::new("Alice")
                    .with(ItemKind::Money, Decimal::new(20, 0))
                    .with(ItemKind::Wood, Decimal::ONE),
            ],
            ..ScenarioConfig::default()
        };
        let holdings = HoldingsBook::from_config(&config);
        assert_eq!(
            inventory_line("Alice", &holdings, &config, &nouns()),
            "Alice's inventory: 20 money, 1 wood, 0 stones"
        );
    }

    #[test]
    fn income_line_lists_all_three_counters() {
        let mut income = IncomeTotals::default();
        income.credit(IncomeKind::HouseBuild, Decimal::new(12, 0));
        income.credit(IncomeKind::SkillTrade, Decimal::new(15, 1));
        assert_eq!(
            income_line(&income),
            "Accumulated income: house trade: 0, house build: 12, skill trade: 1.5"
        );
    }

    #[test]
    fn state_joins_agent_lines_and_income() {
        let config = ScenarioConfig {
            agents: vec![AgentEndowment::new("Alice"), AgentEndowment::new("Bob")],
            ..ScenarioConfig::default()
        };
        let holdings = HoldingsBook::from_config(&config);
        let roster = vec!["Alice".to_owned(), "Bob".to_owned()];

        let state = render_state(
            &roster,
            &holdings,
            &config,
            &nouns(),
            &IncomeTotals::default(),
        );
        let lines: Vec<&str> = state.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.first().unwrap().starts_with("Alice's inventory: "));
        assert!(lines.get(1).unwrap().starts_with("Bob's inventory: "));
        assert!(lines.get(2).unwrap().starts_with("Accumulated income: "));
    }
}
