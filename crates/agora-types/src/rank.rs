//! Ranked preferences over the votable resources and the running Borda tally.
//!
//! A [`Rank`] assigns positional scores to wood, stone, and iron: 2 for
//! first place, 1 for second, 0 for third. Every constructor produces a
//! permutation of `{2, 1, 0}`, so a rank can never hold duplicate or
//! out-of-range scores.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

/// Positional preference scores over wood, stone, and iron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    wood: u8,
    stone: u8,
    iron: u8,
}

impl Default for Rank {
    /// The initial preference: wood first, stone second, iron third.
    fn default() -> Self {
        Self {
            wood: 2,
            stone: 1,
            iron: 0,
        }
    }
}

impl Rank {
    /// Score assigned to wood.
    pub const fn wood(self) -> u8 {
        self.wood
    }

    /// Score assigned to stone.
    pub const fn stone(self) -> u8 {
        self.stone
    }

    /// Score assigned to iron.
    pub const fn iron(self) -> u8 {
        self.iron
    }

    /// Parse a ballot of the form `"wood, stone, iron"`.
    ///
    /// The ballot is valid only when it has exactly three comma-separated
    /// tokens naming each votable resource once. Tokens are matched
    /// case-insensitively with surrounding punctuation ignored. Returns
    /// `None` for anything else; callers fall back to delta inference.
    pub fn parse(ballot: &str) -> Option<Self> {
        let mut tokens = ballot.split(',');
        let first = clean_token(tokens.next()?);
        let second = clean_token(tokens.next()?);
        let third = clean_token(tokens.next()?);
        if tokens.next().is_some() {
            return None;
        }

        let places = [first, second, third];
        let score_of = |name: &str| -> Option<u8> {
            places.iter().enumerate().find_map(|(position, token)| {
                if token == name {
                    Some(match position {
                        0 => 2,
                        1 => 1,
                        _ => 0,
                    })
                } else {
                    None
                }
            })
        };

        // Three slots and three required names: finding all three
        // guarantees a permutation.
        Some(Self {
            wood: score_of("wood")?,
            stone: score_of("stone")?,
            iron: score_of("iron")?,
        })
    }

    /// Infer a rank from per-resource deltas.
    ///
    /// Resources are ordered by delta, descending. Ties resolve in favor of
    /// the earlier branch, so equal deltas order as wood, stone, iron. The
    /// six branches cover every ordering of three values.
    pub fn from_deltas(wood: Decimal, stone: Decimal, iron: Decimal) -> Self {
        if wood >= stone && wood >= iron && stone >= iron {
            Self { wood: 2, stone: 1, iron: 0 }
        } else if wood >= stone && wood >= iron && iron >= stone {
            Self { wood: 2, stone: 0, iron: 1 }
        } else if stone >= wood && stone >= iron && wood >= iron {
            Self { wood: 1, stone: 2, iron: 0 }
        } else if iron >= wood && iron >= stone && wood >= stone {
            Self { wood: 1, stone: 0, iron: 2 }
        } else if stone >= wood && stone >= iron && iron >= wood {
            Self { wood: 0, stone: 2, iron: 1 }
        } else {
            Self { wood: 0, stone: 1, iron: 2 }
        }
    }

    /// The ballot text this rank represents, first place first.
    pub const fn ballot_text(self) -> &'static str {
        match (self.wood, self.stone, self.iron) {
            (2, 1, 0) => "wood, stone, iron",
            (2, 0, 1) => "wood, iron, stone",
            (1, 2, 0) => "stone, wood, iron",
            (1, 0, 2) => "iron, wood, stone",
            (0, 2, 1) => "stone, iron, wood",
            _ => "iron, stone, wood",
        }
    }

    /// Whether the scores form a permutation of `{2, 1, 0}`.
    ///
    /// Always true for ranks built through this type's constructors; exposed
    /// so invariant checks can assert it directly.
    pub fn is_permutation(self) -> bool {
        let mut scores = [self.wood, self.stone, self.iron];
        scores.sort_unstable();
        scores == [0, 1, 2]
    }
}

/// Lowercase a ballot token with surrounding whitespace and punctuation
/// stripped.
fn clean_token(token: &str) -> String {
    token
        .trim()
        .trim_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Vote state
// ---------------------------------------------------------------------------

/// The current ranked preferences, shaped by the governance scheme.
///
/// Libertarian and semi-libertarian societies keep one rank per agent; a
/// fully utilitarian society keeps a single shared rank set by the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteState {
    /// One rank per agent, keyed by agent name.
    PerAgent(BTreeMap<String, Rank>),
    /// One rank for the whole society.
    Shared(Rank),
}

impl VoteState {
    /// Per-agent state with every listed agent at the default rank.
    pub fn per_agent<'a, I>(agents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::PerAgent(
            agents
                .into_iter()
                .map(|name| (name.to_owned(), Rank::default()))
                .collect(),
        )
    }

    /// Shared state at the default rank.
    pub fn shared() -> Self {
        Self::Shared(Rank::default())
    }

    /// The rank carried for an agent, if this is per-agent state.
    pub fn rank_of(&self, agent: &str) -> Option<Rank> {
        match self {
            Self::PerAgent(ranks) => ranks.get(agent).copied(),
            Self::Shared(_) => None,
        }
    }

    /// Replace one agent's rank. No-op for shared state or unknown agents.
    pub fn set_rank(&mut self, agent: &str, rank: Rank) {
        if let Self::PerAgent(ranks) = self {
            if let Some(slot) = ranks.get_mut(agent) {
                *slot = rank;
            }
        }
    }

    /// Replace the shared rank. No-op for per-agent state.
    pub const fn set_shared(&mut self, rank: Rank) {
        if let Self::Shared(slot) = self {
            *slot = rank;
        }
    }

    /// The shared rank, if this is shared state.
    pub const fn shared_rank(&self) -> Option<Rank> {
        match self {
            Self::PerAgent(_) => None,
            Self::Shared(rank) => Some(*rank),
        }
    }
}

// ---------------------------------------------------------------------------
// Borda tally
// ---------------------------------------------------------------------------

/// Running per-resource vote totals.
///
/// Under individual voting the tally accumulates every agent's rank every
/// cycle; under a central planner it is overwritten with the planner's rank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BordaTally {
    wood: u64,
    stone: u64,
    iron: u64,
}

impl BordaTally {
    /// Total accumulated for wood.
    pub const fn wood(self) -> u64 {
        self.wood
    }

    /// Total accumulated for stone.
    pub const fn stone(self) -> u64 {
        self.stone
    }

    /// Total accumulated for iron.
    pub const fn iron(self) -> u64 {
        self.iron
    }

    /// Sum across all three resources.
    pub const fn total(self) -> u64 {
        self.wood
            .saturating_add(self.stone)
            .saturating_add(self.iron)
    }

    /// Add one agent's rank scores into the tally.
    pub fn accumulate(&mut self, rank: Rank) {
        self.wood = self.wood.saturating_add(u64::from(rank.wood()));
        self.stone = self.stone.saturating_add(u64::from(rank.stone()));
        self.iron = self.iron.saturating_add(u64::from(rank.iron()));
    }

    /// Replace the tally with a single rank's scores.
    pub fn overwrite(&mut self, rank: Rank) {
        self.wood = u64::from(rank.wood());
        self.stone = u64::from(rank.stone());
        self.iron = u64::from(rank.iron());
    }
}
