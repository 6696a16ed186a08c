//! Prompt template rendering via `minijinja`.
//!
//! Ships embedded default templates so the oracle works out of the box;
//! operators who want to tune the bookkeeper's framing can point
//! [`PromptEngine::from_dir`] at a directory of `.j2` files instead and
//! edit them without recompiling. The question text itself is composed
//! by the caller; templates only wrap it with the transcript context and
//! the answer-format instruction.

use minijinja::Environment;

use crate::error::OracleError;

// ---------------------------------------------------------------------------
// Question modes
// ---------------------------------------------------------------------------

/// How the answer to a question will be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionMode {
    /// The answer is read as a yes/no verdict.
    YesNo,
    /// The answer is read as free text (a quantity, a list, a ranking).
    Open,
}

impl QuestionMode {
    /// Template-facing name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YesNo => "yes_no",
            Self::Open => "open",
        }
    }

    /// Answer substituted when a scripted oracle has no matching rule.
    #[must_use]
    pub const fn default_reply(self) -> &'static str {
        match self {
            Self::YesNo => "No",
            Self::Open => "",
        }
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

const SYSTEM_TEMPLATE: &str = "You are the bookkeeper of a simulated town \
economy. You read transcripts of game events and answer questions about \
what happened in them, precisely and without commentary.";

const QUESTION_TEMPLATE: &str = "\
{% if transcript %}{{ transcript }}

{% endif %}{{ question }}{% if mode == \"yes_no\" %}

Answer only Yes or No.{% else %}

Answer concisely, with only the value asked for.{% endif %}";

/// Manages prompt template loading and rendering.
///
/// Wraps a `minijinja` [`Environment`] with the system and question
/// templates pre-loaded, either from the embedded defaults or from a
/// directory on disk.
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message establishing the bookkeeper role.
    pub system: String,
    /// User message carrying the transcript and the question.
    pub user: String,
}

impl PromptEngine {
    /// Create a prompt engine using the embedded default templates.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Template`] if a default template fails to
    /// compile, which indicates a packaging defect.
    pub fn new() -> Result<Self, OracleError> {
        let mut env = Environment::new();
        env.add_template("system", SYSTEM_TEMPLATE)
            .map_err(|e| OracleError::Template(format!("failed to add system template: {e}")))?;
        env.add_template("question", QUESTION_TEMPLATE)
            .map_err(|e| OracleError::Template(format!("failed to add question template: {e}")))?;
        Ok(Self { env })
    }

    /// Create a prompt engine loading templates from the given directory.
    ///
    /// The directory must contain `system.j2` and `question.j2`. Both
    /// receive `transcript`, `question`, and `mode` in their context.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Template`] if a file is missing or fails
    /// to compile.
    pub fn from_dir(templates_dir: &str) -> Result<Self, OracleError> {
        let mut env = Environment::new();

        let system_tpl = load_template(templates_dir, "system.j2")?;
        let question_tpl = load_template(templates_dir, "question.j2")?;

        env.add_template_owned("system", system_tpl)
            .map_err(|e| OracleError::Template(format!("failed to add system template: {e}")))?;
        env.add_template_owned("question", question_tpl)
            .map_err(|e| OracleError::Template(format!("failed to add question template: {e}")))?;

        Ok(Self { env })
    }

    /// Render the prompt for one oracle question.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Template`] if a template is missing or
    /// rendering fails.
    pub fn render(
        &self,
        mode: QuestionMode,
        transcript: &str,
        question: &str,
    ) -> Result<RenderedPrompt, OracleError> {
        let context = serde_json::json!({
            "transcript": transcript,
            "question": question,
            "mode": mode.as_str(),
        });

        let system = self
            .env
            .get_template("system")
            .map_err(|e| OracleError::Template(format!("missing system template: {e}")))?
            .render(&context)
            .map_err(|e| OracleError::Template(format!("system render failed: {e}")))?;

        let user = self
            .env
            .get_template("question")
            .map_err(|e| OracleError::Template(format!("missing question template: {e}")))?
            .render(&context)
            .map_err(|e| OracleError::Template(format!("question render failed: {e}")))?;

        Ok(RenderedPrompt { system, user })
    }
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, OracleError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| OracleError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_templates_render_yes_no() {
        let engine = PromptEngine::new().unwrap();
        let prompt = engine
            .render(
                QuestionMode::YesNo,
                "Alice bought wood from Bob.",
                "Did Alice gain any items?",
            )
            .unwrap();

        assert!(prompt.system.contains("bookkeeper"));
        assert!(prompt.user.contains("Alice bought wood from Bob."));
        assert!(prompt.user.contains("Did Alice gain any items?"));
        assert!(prompt.user.contains("Answer only Yes or No."));
    }

    #[test]
    fn default_templates_render_open() {
        let engine = PromptEngine::new().unwrap();
        let prompt = engine
            .render(QuestionMode::Open, "", "How much wood did Alice gain?")
            .unwrap();

        assert!(prompt.user.starts_with("How much wood did Alice gain?"));
        assert!(prompt.user.contains("Answer concisely"));
        assert!(!prompt.user.contains("Yes or No"));
    }

    #[test]
    fn directory_templates_override_defaults() {
        let unique = format!(
            "agora_test_templates_{}_{:?}",
            std::process::id(),
            std::thread::current().id(),
        );
        let dir = std::env::temp_dir().join(unique);
        std::fs::create_dir_all(&dir).ok();
        std::fs::write(dir.join("system.j2"), "Custom system.").ok();
        std::fs::write(
            dir.join("question.j2"),
            "Q[{{ mode }}]: {{ question }}",
        )
        .ok();

        let engine = PromptEngine::from_dir(dir.to_str().unwrap_or("")).unwrap();
        let prompt = engine
            .render(QuestionMode::Open, "ignored", "How many?")
            .unwrap();

        assert_eq!(prompt.system, "Custom system.");
        assert_eq!(prompt.user, "Q[open]: How many?");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_template_dir_returns_error() {
        let result = PromptEngine::from_dir("/nonexistent/agora/templates");
        assert!(result.is_err());
    }
}
