//! The economy tracker: free-text events in, ledger updates out.
//!
//! One tracker owns the whole economic state of a scenario. Each call to
//! [`EconomyTracker::update_after_event`] runs the fixed stage pipeline
//! over a fresh oracle transcript: resource trades, house trades, house
//! builds, skill trades, the vote, then taxes and redistribution. Stages
//! are strictly sequential because every stage reasons over the deltas the
//! earlier stages produced. At the end of a cycle, holdings are clamped
//! into their configured bounds, summaries are re-rendered, effects are
//! pushed to the memory sink, and an audit record is appended to history.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, info};

use agora_oracle::{NounClass, Oracle, answer, classify_all};
use agora_types::{
    BordaTally, HouseColor, IncomeTotals, ItemKind, Rank, UpdateId, UpdateRecord, VoteState,
};

use crate::build::{self, BuildParams};
use crate::clock::EventClock;
use crate::config::ScenarioConfig;
use crate::cycle::CycleState;
use crate::error::EngineError;
use crate::holdings::HoldingsBook;
use crate::memory::{BufferedMemory, MemorySink};
use crate::summary;
use crate::tax::{self, TaxResolution};
use crate::trade::{self, TradeParams, TradeProfile};
use crate::vote;

/// The ledger and policy engine for one scenario.
pub struct EconomyTracker<M = BufferedMemory> {
    config: ScenarioConfig,
    oracle: Oracle,
    clock: EventClock,
    roster: Vec<String>,
    nouns: BTreeMap<ItemKind, NounClass>,
    holdings: HoldingsBook,
    votes: VoteState,
    borda: BordaTally,
    taxes: BTreeMap<String, Decimal>,
    income: IncomeTotals,
    memory: M,
    history: Vec<UpdateRecord>,
    state: String,
    partial_states: BTreeMap<String, String>,
}

impl EconomyTracker<BufferedMemory> {
    /// Build a tracker that keeps effect strings in a buffered sink.
    ///
    /// # Errors
    ///
    /// Fails like [`EconomyTracker::new`].
    pub async fn with_buffered_memory(
        config: ScenarioConfig,
        oracle: Oracle,
        clock: EventClock,
    ) -> Result<Self, EngineError> {
        Self::new(config, oracle, clock, BufferedMemory::new()).await
    }
}

impl<M: MemorySink> EconomyTracker<M> {
    /// Build a tracker from a scenario, an oracle, a clock, and a sink.
    ///
    /// Validates the scenario, classifies every tracked kind as a count or
    /// mass noun in one concurrent oracle pass, seeds holdings from the
    /// endowments, and renders the initial state summary.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] for an invalid scenario and
    /// [`EngineError::Oracle`] if noun classification fails.
    pub async fn new(
        config: ScenarioConfig,
        oracle: Oracle,
        clock: EventClock,
        memory: M,
    ) -> Result<Self, EngineError> {
        config.validate()?;

        let roster: Vec<String> = config.agent_names().map(str::to_owned).collect();
        let tracked: Vec<ItemKind> = ItemKind::ALL
            .into_iter()
            .filter(|kind| config.tracks(*kind))
            .collect();
        let nouns = classify_all(&oracle, &tracked).await?;

        let holdings = HoldingsBook::from_config(&config);
        let votes = if config.governance.agents_vote() {
            VoteState::per_agent(roster.iter().map(String::as_str))
        } else {
            VoteState::shared()
        };
        let taxes = roster
            .iter()
            .map(|agent| (agent.clone(), Decimal::ZERO))
            .collect();

        let mut tracker = Self {
            config,
            oracle,
            clock,
            roster,
            nouns,
            holdings,
            votes,
            borda: BordaTally::default(),
            taxes,
            income: IncomeTotals::default(),
            memory,
            history: Vec::new(),
            state: String::new(),
            partial_states: BTreeMap::new(),
        };
        tracker.update();
        Ok(tracker)
    }

    /// Interpret one event and fold its consequences into the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Oracle`] when an oracle query fails; a
    /// malformed oracle answer is never an error, only coerced.
    pub async fn update_after_event(&mut self, event: &str) -> Result<(), EngineError> {
        let mut cycle = CycleState::new(self.roster.iter().map(String::as_str));

        self.trade_stage(&mut cycle, event, ItemKind::RESOURCES)
            .await?;
        self.trade_stage(&mut cycle, event, ItemKind::HOUSES).await?;
        self.build_stage(&mut cycle, event).await?;
        self.trade_stage(&mut cycle, event, ItemKind::SKILLS).await?;
        self.vote_stage(&mut cycle, event).await?;
        self.tax_stage(&mut cycle).await?;

        self.holdings.apply_bounds(&self.config);
        self.update();

        let record = self.seal_record(cycle);
        info!(
            event,
            inventory_effects = record.inventory_effects.len(),
            vote_effects = record.vote_effects.len(),
            tax_effects = record.tax_effects.len(),
            "event processed"
        );
        self.history.push(record);
        Ok(())
    }

    /// Re-render the state summary and the per-agent views.
    ///
    /// Called automatically after construction and after every event;
    /// calling it again with no intervening event changes nothing.
    pub fn update(&mut self) {
        self.state = summary::render_state(
            &self.roster,
            &self.holdings,
            &self.config,
            &self.nouns,
            &self.income,
        );
        self.partial_states = self
            .roster
            .iter()
            .map(|agent| {
                let line = summary::inventory_line(agent, &self.holdings, &self.config, &self.nouns);
                (agent.clone(), line)
            })
            .collect();
    }

    // -----------------------------------------------------------------------
    // Stages
    // -----------------------------------------------------------------------

    async fn trade_stage(
        &mut self,
        cycle: &mut CycleState,
        event: &str,
        kinds: [ItemKind; 3],
    ) -> Result<(), EngineError> {
        let tracked: Vec<ItemKind> = kinds
            .into_iter()
            .filter(|kind| self.config.tracks(*kind))
            .collect();
        if tracked.is_empty() {
            return Ok(());
        }
        frame_stage(cycle, &self.roster, &tracked, event);

        for agent in &self.roster {
            for &kind in &tracked {
                let Some(profile) = TradeProfile::for_category(kind.category()) else {
                    continue;
                };

                let traded = self
                    .oracle
                    .yes_no(cycle.transcript_mut(), &trade::gate_question(agent, kind))
                    .await?;
                if !traded {
                    continue;
                }

                let quantity_answer = self
                    .oracle
                    .open_question(
                        cycle.transcript_mut(),
                        &trade::quantity_question(agent, kind),
                    )
                    .await?;
                let amount_answer = self
                    .oracle
                    .open_question(cycle.transcript_mut(), &trade::amount_question(kind, profile))
                    .await?;

                let params = TradeParams {
                    agent,
                    kind,
                    quantity: trade::sanitize_quantity(answer::parse_integer(&quantity_answer)),
                    amount: trade::sanitize_amount(answer::parse_decimal(&amount_answer), profile),
                    clamp_skill_sales: self.config.clamp_skill_sales,
                };
                trade::apply_trade(&params, &mut self.holdings, cycle, &mut self.income);
            }
        }
        Ok(())
    }

    async fn build_stage(&mut self, cycle: &mut CycleState, event: &str) -> Result<(), EngineError> {
        let buildable: Vec<HouseColor> = HouseColor::ALL
            .into_iter()
            .filter(|color| self.config.tracks(color.house()))
            .collect();
        if buildable.is_empty() {
            return Ok(());
        }
        let kinds: Vec<ItemKind> = buildable.iter().map(|color| color.house()).collect();
        frame_stage(cycle, &self.roster, &kinds, event);

        for agent in &self.roster {
            for &color in &buildable {
                let built = self
                    .oracle
                    .yes_no(cycle.transcript_mut(), &build::gate_question(agent, color))
                    .await?;
                if !built {
                    continue;
                }

                let count_answer = self
                    .oracle
                    .open_question(
                        cycle.transcript_mut(),
                        &build::quantity_question(agent, color),
                    )
                    .await?;

                let params = BuildParams {
                    agent,
                    color,
                    quantity: build::sanitize_build_quantity(answer::parse_integer(&count_answer)),
                };
                build::apply_build(&params, &mut self.holdings, cycle, &mut self.income);
            }
        }
        Ok(())
    }

    async fn vote_stage(&mut self, cycle: &mut CycleState, event: &str) -> Result<(), EngineError> {
        if self.config.governance.agents_vote() {
            self.agent_vote(cycle, event).await
        } else {
            self.planner_vote(cycle).await
        }
    }

    /// Individual voting: voters cast ballots, everyone else is ranked by
    /// their own deltas, and every agent's rank feeds the Borda tally.
    async fn agent_vote(&mut self, cycle: &mut CycleState, event: &str) -> Result<(), EngineError> {
        cycle.transcript_mut().statement(format!("Event: {event}"));

        let proceed = self
            .oracle
            .yes_no(cycle.transcript_mut(), vote::proceed_question())
            .await?;

        let mut voted: Vec<String> = Vec::new();
        if proceed {
            let named = self
                .oracle
                .open_question(cycle.transcript_mut(), vote::voters_question())
                .await?;
            voted = vote::resolve_voters(&named, &self.roster);

            for agent in &voted {
                let ballot = self
                    .oracle
                    .open_question(cycle.transcript_mut(), &vote::ballot_question(agent))
                    .await?;
                let rank = Rank::parse(&ballot).unwrap_or_else(|| {
                    debug!(agent = %agent, ballot = %ballot, "ballot did not parse; ranking by own deltas");
                    vote::rank_from_own_deltas(cycle, agent)
                });
                self.votes.set_rank(agent, rank);
                cycle.note_vote_effect(vote::vote_effect(agent, rank));
            }
        }

        for agent in &self.roster {
            if voted.contains(agent) {
                continue;
            }
            let rank = vote::rank_from_own_deltas(cycle, agent);
            self.votes.set_rank(agent, rank);
            cycle.note_vote_effect(vote::vote_effect(agent, rank));
        }

        for agent in &self.roster {
            let rank = self.votes.rank_of(agent).unwrap_or_default();
            self.borda.accumulate(rank);
        }
        Ok(())
    }

    /// Central planning: the cycle's deltas are replayed to the oracle and
    /// a single shared rank replaces the Borda tally.
    async fn planner_vote(&mut self, cycle: &mut CycleState) -> Result<(), EngineError> {
        for agent in &self.roster {
            for kind in [ItemKind::Money, ItemKind::Wood, ItemKind::Stone, ItemKind::Iron] {
                let line = cycle.delta_statement(agent, kind);
                cycle.transcript_mut().statement(line);
            }
        }

        let ballot = self
            .oracle
            .open_question(cycle.transcript_mut(), vote::planner_question())
            .await?;
        let rank = Rank::parse(&ballot).unwrap_or_else(|| {
            debug!(ballot = %ballot, "planner ballot did not parse; ranking by trade volume");
            vote::rank_from_volume(cycle, &self.roster)
        });

        self.votes.set_shared(rank);
        self.borda.overwrite(rank);
        cycle.note_vote_effect(vote::planner_vote_effect(rank));
        Ok(())
    }

    /// Per-agent tax assessment, then redistribution of the collected tax.
    async fn tax_stage(&mut self, cycle: &mut CycleState) -> Result<(), EngineError> {
        for agent in &self.roster {
            for other in &self.roster {
                let line = cycle.delta_statement(other, ItemKind::Money);
                cycle.transcript_mut().statement(line);
            }

            let earned = cycle.delta(agent, ItemKind::Money);
            let proposal = self
                .oracle
                .open_question(
                    cycle.transcript_mut(),
                    &tax::tax_question(self.config.reward, agent, earned),
                )
                .await?;

            let resolution = tax::resolve_tax(answer::parse_decimal(&proposal), earned);
            if let TaxResolution::Deducted(levy) = resolution {
                self.holdings.debit(agent, ItemKind::Money, levy);
            }
            let amount = resolution.amount();
            debug!(agent = %agent, tax = %amount, "tax resolved");

            self.taxes.insert(agent.clone(), amount);
            cycle.note_tax_effect(tax::tax_effect(agent, amount));
        }

        let policy = tax::Redistribution {
            governance: self.config.governance,
            roster: &self.roster,
            taxes: &self.taxes,
            votes: &self.votes,
            borda: self.borda,
        };
        tax::redistribute(&policy, &mut self.holdings);
        Ok(())
    }

    fn seal_record(&mut self, cycle: CycleState) -> UpdateRecord {
        let transcript = cycle.transcript().lines().to_vec();
        let (inventory_effects, vote_effects, tax_effects) = cycle.into_effects();

        self.memory.extend(inventory_effects.clone());
        self.memory.extend(vote_effects.clone());
        self.memory.extend(tax_effects.clone());

        UpdateRecord {
            id: UpdateId::new(),
            recorded_at: self.clock.now(),
            income: self.income,
            inventories: self.holdings.snapshot(),
            votes: self.votes.clone(),
            taxes: self.taxes.clone(),
            inventory_effects,
            vote_effects,
            tax_effects,
            transcript,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The scenario name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// The current state summary: agent inventories, then income totals.
    #[must_use]
    pub fn state(&self) -> &str {
        &self.state
    }

    /// One agent's view of the state: their inventory line only.
    #[must_use]
    pub fn partial_state(&self, agent: &str) -> Option<&str> {
        self.partial_states.get(agent).map(String::as_str)
    }

    /// Every processed update, oldest first.
    #[must_use]
    pub fn history(&self) -> &[UpdateRecord] {
        &self.history
    }

    /// The audit record of the most recent update, if any.
    #[must_use]
    pub fn last_record(&self) -> Option<&UpdateRecord> {
        self.history.last()
    }

    /// The memory sink effects are pushed into.
    #[must_use]
    pub const fn memory(&self) -> &M {
        &self.memory
    }

    /// Current holding for one agent and kind.
    #[must_use]
    pub fn quantity(&self, agent: &str, kind: ItemKind) -> Decimal {
        self.holdings.quantity(agent, kind)
    }

    /// The running Borda tally.
    #[must_use]
    pub const fn borda(&self) -> BordaTally {
        self.borda
    }

    /// The current vote state.
    #[must_use]
    pub const fn votes(&self) -> &VoteState {
        &self.votes
    }

    /// Each agent's tax as of the most recent cycle.
    #[must_use]
    pub const fn taxes(&self) -> &BTreeMap<String, Decimal> {
        &self.taxes
    }

    /// Accumulated income totals across all cycles.
    #[must_use]
    pub const fn income(&self) -> IncomeTotals {
        self.income
    }
}

/// Open a stage: who is here, which items this stage covers, and the event.
fn frame_stage(cycle: &mut CycleState, roster: &[String], kinds: &[ItemKind], event: &str) {
    let names: Vec<&str> = kinds.iter().map(|kind| kind.as_str()).collect();
    let transcript = cycle.transcript_mut();
    transcript.statement(format!("List of individuals: {}", roster.join(", ")));
    transcript.statement(format!("List of item types: {}", names.join(", ")));
    transcript.statement(format!("Event: {event}"));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::AgentEndowment;
    use agora_oracle::ScriptedOracle;

    fn scenario() -> ScenarioConfig {
        ScenarioConfig {
            agents: vec![
                AgentEndowment::new("Alice").with(ItemKind::Money, Decimal::new(20, 0)),
                AgentEndowment::new("Bob").with(ItemKind::Wood, Decimal::new(4, 0)),
            ],
            ..ScenarioConfig::default()
        }
    }

    #[tokio::test]
    async fn rejects_invalid_scenarios() {
        let config = ScenarioConfig::default();
        let result = EconomyTracker::with_buffered_memory(
            config,
            Oracle::scripted(ScriptedOracle::new()),
            EventClock::System,
        )
        .await;
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[tokio::test]
    async fn initial_state_lists_agents_and_income() {
        let tracker = EconomyTracker::with_buffered_memory(
            scenario(),
            Oracle::scripted(ScriptedOracle::new()),
            EventClock::System,
        )
        .await
        .unwrap();

        assert_eq!(tracker.name(), "economy");
        let state = tracker.state().to_owned();
        assert!(state.contains("Alice's inventory: "));
        assert!(state.contains("Bob's inventory: "));
        assert!(state.contains("Accumulated income: house trade: 0"));
        assert_eq!(
            tracker.partial_state("Alice"),
            state.lines().next()
        );
        assert!(tracker.partial_state("Mallory").is_none());
        assert!(tracker.history().is_empty());
    }

    #[tokio::test]
    async fn quiet_event_still_votes_and_taxes_everyone() {
        let mut tracker = EconomyTracker::with_buffered_memory(
            scenario(),
            Oracle::scripted(ScriptedOracle::new()),
            EventClock::System,
        )
        .await
        .unwrap();

        tracker.update_after_event("It rained all day.").await.unwrap();

        let record = tracker.last_record().unwrap();
        assert!(record.inventory_effects.is_empty());
        // Both agents are ranked from their (zero) deltas: wood first.
        assert_eq!(
            record.vote_effects,
            [
                "[effect on Alice's Vote] voted wood, stone, iron",
                "[effect on Bob's Vote] voted wood, stone, iron",
            ]
        );
        assert_eq!(
            record.tax_effects,
            [
                "[effect on Alice's Tax] is equal to 0",
                "[effect on Bob's Tax] is equal to 0",
            ]
        );
        assert_eq!(tracker.borda().total(), 6);
        assert_eq!(tracker.quantity("Bob", ItemKind::Wood), Decimal::new(4, 0));
    }

    #[tokio::test]
    async fn summaries_are_idempotent() {
        let mut tracker = EconomyTracker::with_buffered_memory(
            scenario(),
            Oracle::scripted(ScriptedOracle::new()),
            EventClock::System,
        )
        .await
        .unwrap();

        let before = tracker.state().to_owned();
        tracker.update();
        tracker.update();
        assert_eq!(tracker.state(), before);
    }
}
