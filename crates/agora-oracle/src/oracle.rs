//! Unified oracle seam over scripted and LLM-backed question answering.
//!
//! The tracker asks two kinds of questions while interpreting an event:
//! yes/no verdicts and open-ended values. Both append to the running
//! [`Transcript`] so later questions in the same pass see earlier
//! answers. Uses enum dispatch instead of trait objects because async
//! methods are not dyn-compatible in Rust.

use agora_types::ItemKind;
use tracing::debug;

use crate::answer;
use crate::error::OracleError;
use crate::llm::{create_backend, LlmBackend, LlmSettings};
use crate::nouns::NounClass;
use crate::prompt::{PromptEngine, QuestionMode};
use crate::scripted::ScriptedOracle;
use crate::transcript::Transcript;

// ---------------------------------------------------------------------------
// LLM-backed oracle
// ---------------------------------------------------------------------------

/// An oracle that forwards questions to an LLM backend.
pub struct LlmOracle {
    backend: LlmBackend,
    prompts: PromptEngine,
}

impl LlmOracle {
    /// Creates an LLM oracle with the embedded default prompts.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Template`] if the default templates fail
    /// to compile.
    pub fn new(settings: &LlmSettings) -> Result<Self, OracleError> {
        Ok(Self {
            backend: create_backend(settings),
            prompts: PromptEngine::new()?,
        })
    }

    /// Creates an LLM oracle with a custom prompt engine.
    #[must_use]
    pub fn with_prompts(settings: &LlmSettings, prompts: PromptEngine) -> Self {
        Self {
            backend: create_backend(settings),
            prompts,
        }
    }
}

// ---------------------------------------------------------------------------
// Oracle
// ---------------------------------------------------------------------------

/// Answers bookkeeping questions about game events.
pub enum Oracle {
    /// Deterministic rule-table oracle for tests and offline runs.
    Scripted(ScriptedOracle),
    /// LLM-backed oracle.
    Llm(LlmOracle),
}

impl Oracle {
    /// Wraps a scripted oracle.
    #[must_use]
    pub const fn scripted(script: ScriptedOracle) -> Self {
        Self::Scripted(script)
    }

    /// Builds an LLM oracle with default prompts from settings.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Template`] if the default templates fail
    /// to compile.
    pub fn llm(settings: &LlmSettings) -> Result<Self, OracleError> {
        Ok(Self::Llm(LlmOracle::new(settings)?))
    }

    /// Asks a yes/no question, recording it and the raw answer in the
    /// transcript.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] only for transport or template failures;
    /// an answer that is not recognizably "yes" reads as `false`.
    pub async fn yes_no(
        &mut self,
        transcript: &mut Transcript,
        question: &str,
    ) -> Result<bool, OracleError> {
        let raw = self.ask(transcript, QuestionMode::YesNo, question).await?;
        transcript.question(question);
        transcript.answer(&raw);
        let verdict = answer::parse_yes_no(&raw);
        debug!(question, answer = %raw, verdict, "yes/no oracle query");
        Ok(verdict)
    }

    /// Asks an open-ended question, recording it and the raw answer in
    /// the transcript, and returns the raw answer for the caller to
    /// parse.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] for transport or template failures.
    pub async fn open_question(
        &mut self,
        transcript: &mut Transcript,
        question: &str,
    ) -> Result<String, OracleError> {
        let raw = self.ask(transcript, QuestionMode::Open, question).await?;
        transcript.question(question);
        transcript.answer(&raw);
        debug!(question, answer = %raw, "open oracle query");
        Ok(raw)
    }

    async fn ask(
        &mut self,
        transcript: &Transcript,
        mode: QuestionMode,
        question: &str,
    ) -> Result<String, OracleError> {
        match self {
            Self::Scripted(script) => Ok(script
                .respond(question)
                .unwrap_or_else(|| mode.default_reply().to_owned())),
            Self::Llm(oracle) => {
                let prompt = oracle.prompts.render(mode, &transcript.render(), question)?;
                oracle.backend.complete(&prompt).await
            }
        }
    }

    /// Classifies one item kind as a count or mass noun.
    ///
    /// Runs outside any transcript: the classification is a property of
    /// the item name, not of a particular event, and queries for
    /// different kinds may run concurrently. Scripted oracles answer via
    /// a non-consuming peek so classification cannot disturb rule use
    /// counts; an unmatched or negative answer reads as a mass noun.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] for transport or template failures.
    pub async fn classify_noun(&self, kind: ItemKind) -> Result<NounClass, OracleError> {
        let question = noun_question(kind);
        let raw = match self {
            Self::Scripted(script) => script.peek(&question).unwrap_or("No").to_owned(),
            Self::Llm(oracle) => {
                let prompt = oracle.prompts.render(QuestionMode::YesNo, "", &question)?;
                oracle.backend.complete(&prompt).await?
            }
        };
        let class = if answer::parse_yes_no(&raw) {
            NounClass::Count
        } else {
            NounClass::Mass
        };
        debug!(item = %kind, answer = %raw, ?class, "noun classification");
        Ok(class)
    }
}

/// The classification question put to the oracle for one item name.
fn noun_question(kind: ItemKind) -> String {
    format!(
        "Is the word '{kind}' a count noun, that is, something counted in \
         whole units like 'house'? Bulk quantities like 'money' or 'water' \
         are mass nouns, not count nouns."
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
