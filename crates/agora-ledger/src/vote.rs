//! Voting-stage helpers: voter resolution, fallback ranking, effect text.
//!
//! Under individual voting every agent ends the stage with a rank: voters
//! get their parsed ballot, everyone else gets a rank inferred from their
//! own resource deltas. Under a central planner a single shared rank is
//! set, falling back to society-wide trade volume when the planner's
//! ballot does not parse.

use rust_decimal::Decimal;

use agora_oracle::answer;
use agora_types::{ItemKind, Rank};

use crate::cycle::CycleState;

/// The roster members the oracle named as voters, in answer order.
///
/// Unknown names are dropped and duplicates collapse to the first
/// occurrence, so each agent casts at most one ballot per cycle.
#[must_use]
pub fn resolve_voters(answer_text: &str, roster: &[String]) -> Vec<String> {
    let mut voters = Vec::new();
    for name in answer::parse_name_list(answer_text) {
        if roster.iter().any(|agent| *agent == name) && !voters.contains(&name) {
            voters.push(name);
        }
    }
    voters
}

/// Rank inferred from one agent's own resource deltas this cycle.
#[must_use]
pub fn rank_from_own_deltas(cycle: &CycleState, agent: &str) -> Rank {
    Rank::from_deltas(
        cycle.delta(agent, ItemKind::Wood),
        cycle.delta(agent, ItemKind::Stone),
        cycle.delta(agent, ItemKind::Iron),
    )
}

/// Rank inferred from society-wide absolute trade volume per resource.
#[must_use]
pub fn rank_from_volume(cycle: &CycleState, roster: &[String]) -> Rank {
    let volume = |kind: ItemKind| {
        roster.iter().fold(Decimal::ZERO, |total, agent| {
            total.saturating_add(cycle.delta(agent, kind).abs())
        })
    };
    Rank::from_deltas(
        volume(ItemKind::Wood),
        volume(ItemKind::Stone),
        volume(ItemKind::Iron),
    )
}

/// The vote effect string for one agent.
#[must_use]
pub fn vote_effect(agent: &str, rank: Rank) -> String {
    format!("[effect on {agent}'s Vote] voted {}", rank.ballot_text())
}

/// The vote effect string for the central planner.
#[must_use]
pub fn planner_vote_effect(rank: Rank) -> String {
    format!(
        "[effect on central social planner's Vote] voted {}",
        rank.ballot_text()
    )
}

// ---------------------------------------------------------------------------
// Question text
// ---------------------------------------------------------------------------

/// The yes/no gate asking whether a vote happened at all this event.
#[must_use]
pub const fn proceed_question() -> &'static str {
    "In the transcript above, did any of the listed individuals vote on or \
     rank the three resources (wood, stone, and iron)? Count actions that \
     imply a ranking, such as preferring one resource over the others."
}

/// The open question asking who voted.
#[must_use]
pub const fn voters_question() -> &'static str {
    "Which individuals voted on or ranked the resources? Respond with a \
     comma-separated list of names, for example: Jacob, Alfred, Patricia."
}

/// The open question asking for one agent's ballot.
#[must_use]
pub fn ballot_question(agent: &str) -> String {
    format!(
        "How did {agent} rank the three resources? Respond with a \
         comma-separated list from most to least preferred. For example, if \
         {agent} prefers stone to wood and wood to iron, respond: stone, \
         wood, iron."
    )
}

/// The central planner's ranking question, fed the cycle's delta summary.
#[must_use]
pub const fn planner_question() -> &'static str {
    "You are the central social planner of this city. The individuals above \
     performed these economic activities and gained or lost money and \
     resources (wood, stone, iron). As a utilitarian planner who cares \
     about every individual equally and wants them all to prosper, rank the \
     three resources so your ranking reflects their interests. Commit to a \
     ranking even if you are unsure. Respond with a comma-separated list, \
     for example: wood, stone, iron."
}
