//! Event-interpretation oracle for the Agora economy engine.
//!
//! The economy tracker never parses game events itself; it interrogates
//! an oracle about them. This crate provides that seam:
//!
//! - [`Transcript`]: the ordered question/answer log of one pass
//! - [`answer`]: lenient parsing of raw answers into verdicts and values
//! - [`ScriptedOracle`]: deterministic rule-table oracle for tests
//! - [`LlmOracle`] and the [`llm`] backends: HTTP question answering
//! - [`PromptEngine`]: minijinja templates wrapping each question
//! - [`NounClass`] and [`classify_all`]: count/mass noun classification

pub mod answer;
pub mod error;
pub mod llm;
pub mod nouns;
pub mod oracle;
pub mod prompt;
pub mod scripted;
pub mod transcript;

pub use error::OracleError;
pub use llm::{BackendKind, LlmBackend, LlmSettings, create_backend};
pub use nouns::{NounClass, classify_all};
pub use oracle::{LlmOracle, Oracle};
pub use prompt::{PromptEngine, QuestionMode, RenderedPrompt};
pub use scripted::ScriptedOracle;
pub use transcript::Transcript;
