//! Error types for the oracle layer.
//!
//! Uses `thiserror` for typed errors that surface through every oracle
//! query: prompt rendering, LLM transport, response extraction.

/// Errors that can occur while answering an oracle query.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// Failed to load or render a prompt template.
    #[error("template render error: {0}")]
    Template(String),

    /// An LLM backend returned an error or was unreachable.
    #[error("LLM backend error: {0}")]
    Backend(String),

    /// The backend response carried no usable completion text.
    #[error("empty completion: {0}")]
    EmptyCompletion(String),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
