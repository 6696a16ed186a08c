//! Error types for the ledger engine.
//!
//! Only two things can fail structurally: the scenario configuration can
//! be invalid at construction, and the oracle transport can fail mid
//! cycle. Malformed oracle answers are not errors; the resolvers recover
//! them with documented defaults.

use crate::config::ConfigError;
use agora_oracle::OracleError;

/// Errors that can occur while constructing or driving the tracker.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The scenario configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An oracle query failed at the transport or template layer.
    #[error(transparent)]
    Oracle(#[from] OracleError),
}
