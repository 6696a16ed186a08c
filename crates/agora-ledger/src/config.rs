//! Scenario configuration loading and validation.
//!
//! A scenario names the tracked item kinds (with bounds), the agents and
//! their starting holdings, and the governance policy. Configs load from
//! YAML; every structural requirement is checked up front so a bad
//! scenario fails at construction instead of corrupting a run.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use agora_types::{Governance, ItemKind, ItemTypeConfig, RewardPhilosophy};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a scenario.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the scenario file from disk.
    #[error("failed to read scenario file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse scenario YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The scenario parsed but violates a structural requirement.
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// Scenario structures
// ---------------------------------------------------------------------------

/// One agent's name and starting holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentEndowment {
    /// Agent name, as it appears in event statements.
    pub name: String,

    /// Starting holdings. Tracked kinds not listed start at zero.
    #[serde(default)]
    pub holdings: BTreeMap<ItemKind, Decimal>,
}

impl AgentEndowment {
    /// An endowment with the given name and no starting holdings.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            holdings: BTreeMap::new(),
        }
    }

    /// Adds one starting holding.
    #[must_use]
    pub fn with(mut self, kind: ItemKind, quantity: Decimal) -> Self {
        self.holdings.insert(kind, quantity);
        self
    }
}

/// A complete scenario: tracked items, agents, and governance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Component name used in logs and audit summaries.
    #[serde(default = "default_scenario_name")]
    pub name: String,

    /// Governance scheme for voting and redistribution.
    #[serde(default)]
    pub governance: Governance,

    /// Planner philosophy framing tax proposals.
    #[serde(default)]
    pub reward: RewardPhilosophy,

    /// Whether skill sales are clamped to current skill holdings before
    /// the decrement, the way resource and house sales are. Off by
    /// default: an oversold skill goes negative until the end-of-cycle
    /// bounds pass corrects it (if the skill has a configured minimum).
    #[serde(default)]
    pub clamp_skill_sales: bool,

    /// Tracked item kinds and their bounds. Money must be among them.
    #[serde(default = "default_items")]
    pub items: Vec<ItemTypeConfig>,

    /// The agents and their starting holdings.
    #[serde(default)]
    pub agents: Vec<AgentEndowment>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: default_scenario_name(),
            governance: Governance::default(),
            reward: RewardPhilosophy::default(),
            clamp_skill_sales: false,
            items: default_items(),
            agents: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    /// Load and validate a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if the scenario violates a structural
    /// requirement.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if the scenario violates a structural
    /// requirement.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every structural requirement.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first violation found:
    /// no agents, duplicate agents or item kinds, untracked money,
    /// inverted or non-integral bounds, or endowments that name untracked
    /// kinds or violate their bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents.is_empty() {
            return Err(ConfigError::Invalid("no agents configured".to_owned()));
        }

        let mut seen_agents = BTreeSet::new();
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                return Err(ConfigError::Invalid("empty agent name".to_owned()));
            }
            if !seen_agents.insert(agent.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate agent name: {}",
                    agent.name
                )));
            }
        }

        let mut seen_kinds = BTreeSet::new();
        for item in &self.items {
            if !seen_kinds.insert(item.kind) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate item kind: {}",
                    item.kind
                )));
            }
            if let (Some(minimum), Some(maximum)) = (item.minimum, item.maximum) {
                if minimum > maximum {
                    return Err(ConfigError::Invalid(format!(
                        "minimum exceeds maximum for {}",
                        item.kind
                    )));
                }
            }
            if item.force_integer {
                for bound in [item.minimum, item.maximum].into_iter().flatten() {
                    if !bound.fract().is_zero() {
                        return Err(ConfigError::Invalid(format!(
                            "non-integral bound for integer-constrained {}",
                            item.kind
                        )));
                    }
                }
            }
        }

        if !seen_kinds.contains(&ItemKind::Money) {
            return Err(ConfigError::Invalid("money must be tracked".to_owned()));
        }

        for agent in &self.agents {
            for (&kind, &quantity) in &agent.holdings {
                let Some(item) = self.item_config(kind) else {
                    return Err(ConfigError::Invalid(format!(
                        "endowment for {} lists untracked item: {kind}",
                        agent.name
                    )));
                };
                if !item.permits(quantity) {
                    return Err(ConfigError::Invalid(format!(
                        "endowment for {} violates bounds for {kind}: {quantity}",
                        agent.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// The configuration for one kind, if tracked.
    #[must_use]
    pub fn item_config(&self, kind: ItemKind) -> Option<&ItemTypeConfig> {
        self.items.iter().find(|item| item.kind == kind)
    }

    /// Whether a kind is tracked by this scenario.
    #[must_use]
    pub fn tracks(&self, kind: ItemKind) -> bool {
        self.item_config(kind).is_some()
    }

    /// Agent names in declaration order.
    pub fn agent_names(&self) -> impl Iterator<Item = &str> {
        self.agents.iter().map(|agent| agent.name.as_str())
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_scenario_name() -> String {
    "economy".to_owned()
}

/// The full standard item universe: unbounded money, whole-number
/// resources and houses floored at zero, and skills floored at zero but
/// allowed fractional levels.
fn default_items() -> Vec<ItemTypeConfig> {
    let skill = |kind| ItemTypeConfig {
        kind,
        minimum: Some(Decimal::ZERO),
        maximum: None,
        force_integer: false,
    };

    let mut items = vec![ItemTypeConfig::unbounded(ItemKind::Money)];
    items.extend(ItemKind::RESOURCES.into_iter().map(ItemTypeConfig::counted));
    items.extend(ItemKind::HOUSES.into_iter().map(ItemTypeConfig::counted));
    items.extend(ItemKind::SKILLS.into_iter().map(skill));
    items
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
