//! Ledger and policy engine for the Agora economy simulation.
//!
//! The tracker in this crate keeps the full economic state of a scenario:
//! per-agent holdings, ranked votes, taxes, and accumulated income. It
//! never parses free-text game events itself. Each event is interrogated
//! through the oracle crate in a fixed stage order, and every stage folds
//! its verdicts into the same cycle state before the ledger is updated.
//!
//! # Architecture
//!
//! - [`config`] -- Scenario schema: tracked items, endowments, governance.
//! - [`holdings`] -- Per-agent accounts with saturating credit and debit.
//! - [`cycle`] -- Working state of one update: transcript, deltas, effects.
//! - [`trade`] -- Signed-quantity trade resolution and clamping.
//! - [`build`] -- House construction from materials, skill, and payout.
//! - [`vote`] -- Voter resolution and ballot fallbacks.
//! - [`tax`] -- Tax assessment and redistribution policies.
//! - [`summary`] -- Narrative inventory and income rendering.
//! - [`memory`] -- The sink effect strings are pushed into.
//! - [`clock`] -- Wall-clock or pinned timestamps for audit records.
//! - [`engine`] -- The [`EconomyTracker`] driving all stages per event.
//!
//! # Stage order
//!
//! An update runs resource trades, house trades, house builds, skill
//! trades, the vote, then taxes and redistribution. The order matters:
//! builds consume materials bought earlier in the same cycle, votes rank
//! the cycle's resource deltas, and taxes are assessed on the cycle's
//! money deltas.
//!
//! # Usage
//!
//! The resolvers are plain functions over the cycle state, usable without
//! an oracle:
//!
//! ```
//! use agora_ledger::config::AgentEndowment;
//! use agora_ledger::trade::{self, TradeParams};
//! use agora_ledger::{CycleState, HoldingsBook, ScenarioConfig};
//! use agora_types::{IncomeTotals, ItemKind};
//! use rust_decimal::Decimal;
//!
//! let config = ScenarioConfig {
//!     agents: vec![AgentEndowment::new("Alice").with(ItemKind::Money, Decimal::new(20, 0))],
//!     ..ScenarioConfig::default()
//! };
//! let mut holdings = HoldingsBook::from_config(&config);
//! let mut cycle = CycleState::new(["Alice"]);
//! let mut income = IncomeTotals::default();
//!
//! // Alice buys 3 wood for 5 money in total.
//! let params = TradeParams {
//!     agent: "Alice",
//!     kind: ItemKind::Wood,
//!     quantity: Decimal::new(3, 0),
//!     amount: Decimal::new(5, 0),
//!     clamp_skill_sales: false,
//! };
//! trade::apply_trade(&params, &mut holdings, &mut cycle, &mut income);
//!
//! assert_eq!(holdings.quantity("Alice", ItemKind::Wood), Decimal::new(3, 0));
//! assert_eq!(holdings.quantity("Alice", ItemKind::Money), Decimal::new(15, 0));
//! ```

pub mod build;
pub mod clock;
pub mod config;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod holdings;
pub mod memory;
pub mod summary;
pub mod tax;
pub mod trade;
pub mod vote;

// Re-export primary types at crate root.
pub use clock::EventClock;
pub use config::{AgentEndowment, ConfigError, ScenarioConfig};
pub use cycle::CycleState;
pub use engine::EconomyTracker;
pub use error::EngineError;
pub use holdings::HoldingsBook;
pub use memory::{BufferedMemory, MemorySink};
