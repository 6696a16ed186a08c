//! Signed-quantity trade resolution.
//!
//! Every trade is inferred as one oracle exchange: a yes/no gate, a signed
//! quantity (negative means the agent sold), and the total money that
//! changed hands. Malformed answers never fail a cycle; they are coerced
//! to per-category defaults, and infeasible trades are clamped to what the
//! agent can actually cover.

use rust_decimal::Decimal;
use tracing::debug;

use agora_types::{IncomeKind, IncomeTotals, ItemCategory, ItemKind};

use crate::cycle::CycleState;
use crate::holdings::HoldingsBook;

/// Per-category defaults and ceiling for the money side of a trade.
///
/// The quantity default is 1 for every category; only the money amount
/// varies: resources settle around small sums, houses are an order of
/// magnitude dearer, skills sit in between.
#[derive(Debug, Clone, Copy)]
pub struct TradeProfile {
    /// Substituted when the oracle's amount is missing, zero, or over the
    /// ceiling.
    pub default_amount: Decimal,
    /// Largest credible money amount for one trade of this category.
    pub amount_ceiling: Decimal,
}

impl TradeProfile {
    /// The profile for a tradable category, `None` for currency itself.
    #[must_use]
    pub fn for_category(category: ItemCategory) -> Option<Self> {
        match category {
            ItemCategory::Currency => None,
            ItemCategory::Resource => Some(Self {
                default_amount: Decimal::new(25, 1),
                amount_ceiling: Decimal::new(25, 0),
            }),
            ItemCategory::House => Some(Self {
                default_amount: Decimal::new(15, 0),
                amount_ceiling: Decimal::new(150, 0),
            }),
            ItemCategory::Skill => Some(Self {
                default_amount: Decimal::new(15, 1),
                amount_ceiling: Decimal::new(15, 0),
            }),
        }
    }

    /// The income counter credited when an agent buys this category.
    #[must_use]
    pub const fn income_on_buy(category: ItemCategory) -> Option<IncomeKind> {
        match category {
            ItemCategory::Currency | ItemCategory::Resource => None,
            ItemCategory::House => Some(IncomeKind::HouseTrade),
            ItemCategory::Skill => Some(IncomeKind::SkillTrade),
        }
    }
}

/// Coerce a parsed quantity answer: missing or zero becomes 1, and the
/// sign is kept as reported.
#[must_use]
pub fn sanitize_quantity(parsed: Option<i64>) -> Decimal {
    let quantity = parsed.map_or(Decimal::ONE, Decimal::from);
    if quantity.is_zero() {
        Decimal::ONE
    } else {
        quantity
    }
}

/// Coerce a parsed money amount: a parsed value loses its sign, and
/// missing, zero, or over-ceiling values fall back to the default.
#[must_use]
pub fn sanitize_amount(parsed: Option<Decimal>, profile: TradeProfile) -> Decimal {
    let amount = parsed.map_or(profile.default_amount, |value| value.abs());
    if amount.is_zero() || amount > profile.amount_ceiling {
        profile.default_amount
    } else {
        amount
    }
}

/// One sanitized trade, ready to apply.
#[derive(Debug)]
pub struct TradeParams<'a> {
    /// The trading agent.
    pub agent: &'a str,
    /// The item changing hands.
    pub kind: ItemKind,
    /// Signed quantity: positive bought, negative sold.
    pub quantity: Decimal,
    /// Total money exchanged, always non-negative.
    pub amount: Decimal,
    /// Whether skill sales clamp to current skill holdings.
    pub clamp_skill_sales: bool,
}

/// Apply one trade to the holdings, deltas, and effect log.
///
/// Sells clamp to current holdings, so an agent holding nothing sells
/// nothing. Skill sales are the exception: by default they decrement the
/// skill without a clamp, and the end-of-cycle bounds pass absorbs any
/// excursion. Buys clamp the money side to what the buyer has, floored at
/// zero. A buy also credits the category's income counter.
pub fn apply_trade(
    params: &TradeParams<'_>,
    holdings: &mut HoldingsBook,
    cycle: &mut CycleState,
    income: &mut IncomeTotals,
) {
    let mut quantity = params.quantity;
    let mut amount = params.amount;
    let is_skill = params.kind.category() == ItemCategory::Skill;

    if quantity < Decimal::ZERO {
        let held = holdings.quantity(params.agent, params.kind);
        if (!is_skill || params.clamp_skill_sales) && quantity.abs() > held {
            quantity = -held.max(Decimal::ZERO);
            debug!(agent = params.agent, kind = %params.kind, clamped = %quantity, "sell clamped to holdings");
        }
    } else if quantity > Decimal::ZERO {
        let money = holdings.quantity(params.agent, ItemKind::Money);
        if amount > money {
            amount = money.max(Decimal::ZERO);
            debug!(agent = params.agent, kind = %params.kind, clamped = %amount, "buy clamped to available money");
        }
    }

    let prefix = format!("[effect on {}'s Inventory]", params.agent);

    if quantity > Decimal::ZERO {
        holdings.credit(params.agent, params.kind, quantity);
        cycle.note_inventory_effect(format!(
            "{prefix} gained {} {}",
            quantity.normalize(),
            params.kind
        ));

        holdings.debit(params.agent, ItemKind::Money, amount);
        cycle.note_inventory_effect(format!("{prefix} lost {} money", amount.normalize()));

        if let Some(counter) = TradeProfile::income_on_buy(params.kind.category()) {
            income.credit(counter, amount);
        }

        cycle.record_delta(params.agent, params.kind, quantity);
        cycle.record_delta(params.agent, ItemKind::Money, -amount);
    } else if quantity < Decimal::ZERO {
        let sold = quantity.abs();
        holdings.debit(params.agent, params.kind, sold);
        cycle.note_inventory_effect(format!(
            "{prefix} lost {} {}",
            sold.normalize(),
            params.kind
        ));

        holdings.credit(params.agent, ItemKind::Money, amount);
        cycle.note_inventory_effect(format!("{prefix} gained {} money", amount.normalize()));

        cycle.record_delta(params.agent, params.kind, quantity);
        cycle.record_delta(params.agent, ItemKind::Money, amount);
    }
}

// ---------------------------------------------------------------------------
// Question text
// ---------------------------------------------------------------------------

/// The yes/no gate asking whether an agent traded a kind this event.
#[must_use]
pub fn gate_question(agent: &str, kind: ItemKind) -> String {
    let guidance = match kind.category() {
        ItemCategory::Resource => {
            "Treat equivalent goods as the same resource: a tree counts as wood, \
             a rock counts as stone, and metal counts as iron."
        }
        ItemCategory::House => "Count only purchases and sales, not building.",
        ItemCategory::Skill | ItemCategory::Currency => {
            "Count only trades of building skills, not purchases, sales, or \
             construction of the houses themselves."
        }
    };
    format!("In the transcript above, did {agent} buy or sell any {kind}? {guidance}")
}

/// The signed-quantity question for one agent and kind.
#[must_use]
pub fn quantity_question(agent: &str, kind: ItemKind) -> String {
    format!(
        "How many {kind} did {agent} buy or sell? Report a negative integer \
         if {agent} sold and a positive integer if {agent} bought. If you \
         cannot tell, answer 1."
    )
}

/// The money-amount question for one kind.
#[must_use]
pub fn amount_question(kind: ItemKind, profile: TradeProfile) -> String {
    format!(
        "How much money changed hands in the exchange of {kind}? Answer with \
         a number greater than 0. If no price is mentioned, answer {}.",
        profile.default_amount.normalize()
    )
}
