//! House construction: skill-gated, material-capped building.
//!
//! Building is the one way agents mint value instead of moving it. Each
//! house consumes one unit of each of its two materials and pays the
//! builder money equal to their skill level per house, so skill directly
//! prices a builder's labor. A skill of 5 or below cannot build at all.

use rust_decimal::Decimal;
use tracing::debug;

use agora_types::{HouseColor, IncomeKind, IncomeTotals, ItemKind};

use crate::cycle::CycleState;
use crate::holdings::HoldingsBook;

/// Coerce a parsed build count: missing or zero becomes 1, and a negative
/// report is read as its magnitude.
#[must_use]
pub fn sanitize_build_quantity(parsed: Option<i64>) -> Decimal {
    let quantity = parsed.map_or(Decimal::ONE, |count| Decimal::from(count).abs());
    if quantity.is_zero() {
        Decimal::ONE
    } else {
        quantity
    }
}

/// One sanitized build order, ready to apply.
#[derive(Debug)]
pub struct BuildParams<'a> {
    /// The building agent.
    pub agent: &'a str,
    /// Which house color is being built.
    pub color: HouseColor,
    /// Requested house count, positive.
    pub quantity: Decimal,
}

/// Apply one build to the holdings, deltas, and effect log.
///
/// The order is gated on skill, then capped to the scarcer of the two
/// required materials. A fully gated or capped-out order leaves no trace.
pub fn apply_build(
    params: &BuildParams<'_>,
    holdings: &mut HoldingsBook,
    cycle: &mut CycleState,
    income: &mut IncomeTotals,
) {
    let skill = holdings.quantity(params.agent, params.color.skill());
    let mut quantity = params.quantity;

    if skill <= Decimal::new(5, 0) {
        quantity = Decimal::ZERO;
    }

    let (first, second) = params.color.materials();
    let held_first = holdings.quantity(params.agent, first);
    let held_second = holdings.quantity(params.agent, second);
    if held_first < quantity || held_second < quantity {
        quantity = held_first.min(held_second);
        debug!(agent = params.agent, color = %params.color, capped = %quantity, "build capped by materials");
    }

    if quantity <= Decimal::ZERO {
        return;
    }

    let prefix = format!("[effect on {}'s Inventory]", params.agent);
    let count = quantity.normalize();

    holdings.debit(params.agent, first, quantity);
    cycle.note_inventory_effect(format!("{prefix} lost {count} {first}s"));

    holdings.debit(params.agent, second, quantity);
    cycle.note_inventory_effect(format!("{prefix} lost {count} {second}s"));

    holdings.credit(params.agent, params.color.house(), quantity);
    cycle.note_inventory_effect(format!("{prefix} gained {count} {}s", params.color.house()));

    let payout = quantity.saturating_mul(skill);
    holdings.credit(params.agent, ItemKind::Money, payout);
    cycle.note_inventory_effect(format!("{prefix} gained {} money", payout.normalize()));

    income.credit(IncomeKind::HouseBuild, payout);

    cycle.record_delta(params.agent, first, -quantity);
    cycle.record_delta(params.agent, second, -quantity);
    cycle.record_delta(params.agent, params.color.house(), quantity);
    cycle.record_delta(params.agent, ItemKind::Money, payout);
}

// ---------------------------------------------------------------------------
// Question text
// ---------------------------------------------------------------------------

/// The yes/no gate asking whether an agent built a house color this event.
#[must_use]
pub fn gate_question(agent: &str, color: HouseColor) -> String {
    format!(
        "In the transcript above, did {agent} build any {}s? Count only \
         building, not buying or selling.",
        color.house()
    )
}

/// The build-count question for one agent and color.
#[must_use]
pub fn quantity_question(agent: &str, color: HouseColor) -> String {
    format!(
        "How many {}s did {agent} build? Answer with a whole number greater \
         than 0. If you cannot tell, answer 1.",
        color.house()
    )
}
