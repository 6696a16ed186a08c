//! Governance schemes and social reward philosophies.
//!
//! The pair of enums here selects how votes are collected, how the tax
//! planner is framed, and how collected tax flows back into inventories.
//! Both use the long-form wire names in scenario files.

use serde::{Deserialize, Serialize};

/// How the society aggregates preferences and redistributes tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Governance {
    /// Each agent votes and keeps an individual rank; each agent's own tax
    /// is returned to them split by their own rank.
    #[default]
    #[serde(rename = "Full-Libertarian")]
    FullLibertarian,

    /// Each agent votes individually, but the pooled tax is redistributed
    /// to everyone according to the running Borda tally.
    #[serde(rename = "Semi-Libertarian/Utilitarian")]
    SemiLibertarianUtilitarian,

    /// A central planner casts one vote for the whole society; the pooled
    /// tax is redistributed to everyone according to that single rank.
    #[serde(rename = "Full-Utilitarian")]
    FullUtilitarian,
}

impl Governance {
    /// Wire name, as it appears in scenario files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullLibertarian => "Full-Libertarian",
            Self::SemiLibertarianUtilitarian => "Semi-Libertarian/Utilitarian",
            Self::FullUtilitarian => "Full-Utilitarian",
        }
    }

    /// Whether agents vote individually (as opposed to a central planner).
    pub const fn agents_vote(self) -> bool {
        matches!(self, Self::FullLibertarian | Self::SemiLibertarianUtilitarian)
    }
}

impl core::fmt::Display for Governance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the tax planner optimizes for when proposing per-agent taxes.
///
/// The philosophy changes only the planner's framing; the resolution chain
/// applied to the proposed amount is identical for both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RewardPhilosophy {
    /// Keep taxes low on high earners so effort stays worthwhile.
    #[default]
    #[serde(rename = "Productivity")]
    Productivity,

    /// Tax high earners heavily to even out wealth.
    #[serde(rename = "Equality")]
    Equality,
}

impl RewardPhilosophy {
    /// Wire name, as it appears in scenario files.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Productivity => "Productivity",
            Self::Equality => "Equality",
        }
    }
}

impl core::fmt::Display for RewardPhilosophy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
