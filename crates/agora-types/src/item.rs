//! The canonical item universe: kinds, categories, bounds, and build recipes.
//!
//! Every quantity in the engine is keyed by an [`ItemKind`]. The universe is
//! closed: one currency, three tradable resources, three house goods, and
//! three house-building skills. A scenario tracks any subset of this universe
//! that includes [`ItemKind::Money`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Item kinds
// ---------------------------------------------------------------------------

/// A kind of item an agent can hold.
///
/// The declaration order is the canonical processing order: stages visit
/// tracked kinds in this order, and inventory summaries render in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// The medium of exchange. Every scenario must track it.
    #[serde(rename = "money")]
    Money,

    // --- Tradable resources ---
    /// Lumber. Narrative equivalents such as "tree" count as wood.
    #[serde(rename = "wood")]
    Wood,
    /// Quarried stone. Narrative equivalents such as "rock" count as stone.
    #[serde(rename = "stone")]
    Stone,
    /// Iron. Narrative equivalents such as "metal" count as iron.
    #[serde(rename = "iron")]
    Iron,

    // --- House goods ---
    /// A red house, built from wood and stone.
    #[serde(rename = "red house")]
    RedHouse,
    /// A blue house, built from wood and iron.
    #[serde(rename = "blue house")]
    BlueHouse,
    /// A green house, built from stone and iron.
    #[serde(rename = "green house")]
    GreenHouse,

    // --- Building skills ---
    /// Proficiency at building red houses.
    #[serde(rename = "red house building skill")]
    RedHouseSkill,
    /// Proficiency at building blue houses.
    #[serde(rename = "blue house building skill")]
    BlueHouseSkill,
    /// Proficiency at building green houses.
    #[serde(rename = "green house building skill")]
    GreenHouseSkill,
}

impl ItemKind {
    /// Every kind in the universe, in canonical order.
    pub const ALL: [Self; 10] = [
        Self::Money,
        Self::Wood,
        Self::Stone,
        Self::Iron,
        Self::RedHouse,
        Self::BlueHouse,
        Self::GreenHouse,
        Self::RedHouseSkill,
        Self::BlueHouseSkill,
        Self::GreenHouseSkill,
    ];

    /// The three tradable resources, in voting order.
    pub const RESOURCES: [Self; 3] = [Self::Wood, Self::Stone, Self::Iron];

    /// The three house goods.
    pub const HOUSES: [Self; 3] = [Self::RedHouse, Self::BlueHouse, Self::GreenHouse];

    /// The three building skills.
    pub const SKILLS: [Self; 3] = [Self::RedHouseSkill, Self::BlueHouseSkill, Self::GreenHouseSkill];

    /// Wire name, as it appears in scenario files and oracle questions.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Iron => "iron",
            Self::RedHouse => "red house",
            Self::BlueHouse => "blue house",
            Self::GreenHouse => "green house",
            Self::RedHouseSkill => "red house building skill",
            Self::BlueHouseSkill => "blue house building skill",
            Self::GreenHouseSkill => "green house building skill",
        }
    }

    /// The category this kind belongs to.
    pub const fn category(self) -> ItemCategory {
        match self {
            Self::Money => ItemCategory::Currency,
            Self::Wood | Self::Stone | Self::Iron => ItemCategory::Resource,
            Self::RedHouse | Self::BlueHouse | Self::GreenHouse => ItemCategory::House,
            Self::RedHouseSkill | Self::BlueHouseSkill | Self::GreenHouseSkill => {
                ItemCategory::Skill
            }
        }
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The functional category of an item kind.
///
/// Trade stages run per category with category-specific price defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// The medium of exchange.
    Currency,
    /// Tradable and votable raw resources.
    Resource,
    /// Finished house goods, tradable and buildable.
    House,
    /// House-building proficiencies, tradable.
    Skill,
}

// ---------------------------------------------------------------------------
// House colors and build recipes
// ---------------------------------------------------------------------------

/// A house color, carrying its build recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HouseColor {
    /// Red houses consume wood and stone.
    Red,
    /// Blue houses consume wood and iron.
    Blue,
    /// Green houses consume stone and iron.
    Green,
}

impl HouseColor {
    /// Every color, in processing order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Blue, Self::Green];

    /// The color name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }

    /// The house good this color produces.
    pub const fn house(self) -> ItemKind {
        match self {
            Self::Red => ItemKind::RedHouse,
            Self::Blue => ItemKind::BlueHouse,
            Self::Green => ItemKind::GreenHouse,
        }
    }

    /// The skill that gates building this color.
    pub const fn skill(self) -> ItemKind {
        match self {
            Self::Red => ItemKind::RedHouseSkill,
            Self::Blue => ItemKind::BlueHouseSkill,
            Self::Green => ItemKind::GreenHouseSkill,
        }
    }

    /// The two materials consumed 1:1 per house built.
    pub const fn materials(self) -> (ItemKind, ItemKind) {
        match self {
            Self::Red => (ItemKind::Wood, ItemKind::Stone),
            Self::Blue => (ItemKind::Wood, ItemKind::Iron),
            Self::Green => (ItemKind::Stone, ItemKind::Iron),
        }
    }
}

impl core::fmt::Display for HouseColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Item type configuration
// ---------------------------------------------------------------------------

/// Per-kind holding bounds, fixed at scenario construction.
///
/// `None` bounds are unbounded in that direction. Bounds are enforced by
/// clamping at the end of every update cycle, never by rejecting an
/// operation mid-cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTypeConfig {
    /// The kind this configuration applies to.
    pub kind: ItemKind,

    /// Smallest permitted holding, if any.
    #[serde(default)]
    pub minimum: Option<Decimal>,

    /// Largest permitted holding, if any.
    #[serde(default)]
    pub maximum: Option<Decimal>,

    /// Whether holdings of this kind are truncated to whole numbers.
    #[serde(default)]
    pub force_integer: bool,
}

impl ItemTypeConfig {
    /// A configuration with no bounds and no integer constraint.
    pub const fn unbounded(kind: ItemKind) -> Self {
        Self {
            kind,
            minimum: None,
            maximum: None,
            force_integer: false,
        }
    }

    /// A whole-number configuration bounded below at zero.
    pub const fn counted(kind: ItemKind) -> Self {
        Self {
            kind,
            minimum: Some(Decimal::ZERO),
            maximum: None,
            force_integer: true,
        }
    }

    /// Clamp a holding into the configured bounds.
    ///
    /// Applies the minimum, then the maximum, then truncates toward zero
    /// when `force_integer` is set.
    pub fn clamp(&self, value: Decimal) -> Decimal {
        let mut clamped = value;
        if let Some(minimum) = self.minimum {
            if clamped < minimum {
                clamped = minimum;
            }
        }
        if let Some(maximum) = self.maximum {
            if clamped > maximum {
                clamped = maximum;
            }
        }
        if self.force_integer {
            clamped = clamped.trunc();
        }
        clamped
    }

    /// Whether a value already satisfies the bounds and integer constraint.
    pub fn permits(&self, value: Decimal) -> bool {
        if let Some(minimum) = self.minimum {
            if value < minimum {
                return false;
            }
        }
        if let Some(maximum) = self.maximum {
            if value > maximum {
                return false;
            }
        }
        if self.force_integer && !value.fract().is_zero() {
            return false;
        }
        true
    }
}
