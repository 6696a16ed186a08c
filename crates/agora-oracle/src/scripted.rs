//! Deterministic scripted oracle for tests and offline runs.
//!
//! Rules pair substring needles with a canned reply. Questions are
//! matched against rules in insertion order; the first rule whose
//! needles all appear in the question wins. A rule may be limited to a
//! number of uses so that repeated questions (one per agent, say) can
//! walk through different answers.

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct ScriptedRule {
    needles: Vec<String>,
    reply: String,
    /// `None` means unlimited uses.
    remaining: Option<u32>,
}

impl ScriptedRule {
    fn matches(&self, question: &str) -> bool {
        self.remaining != Some(0)
            && self
                .needles
                .iter()
                .all(|needle| question.contains(needle.as_str()))
    }
}

// ---------------------------------------------------------------------------
// ScriptedOracle
// ---------------------------------------------------------------------------

/// Answers questions from an ordered rule table instead of an LLM.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    rules: Vec<ScriptedRule>,
}

impl ScriptedOracle {
    /// Creates an oracle with no rules; every question falls through to
    /// the caller's default answer.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule that replies whenever every needle appears in the
    /// question, with no use limit.
    #[must_use]
    pub fn on(self, needles: &[&str], reply: &str) -> Self {
        self.rule(needles, reply, None)
    }

    /// Adds a rule limited to `times` uses, after which matching falls
    /// through to later rules.
    #[must_use]
    pub fn on_times(self, needles: &[&str], reply: &str, times: u32) -> Self {
        self.rule(needles, reply, Some(times))
    }

    fn rule(mut self, needles: &[&str], reply: &str, remaining: Option<u32>) -> Self {
        self.rules.push(ScriptedRule {
            needles: needles.iter().map(|&n| n.to_owned()).collect(),
            reply: reply.to_owned(),
            remaining,
        });
        self
    }

    /// Answers a question, consuming one use of the matched rule.
    ///
    /// Returns `None` when no rule matches.
    pub fn respond(&mut self, question: &str) -> Option<String> {
        let rule = self
            .rules
            .iter_mut()
            .find(|rule| rule.matches(question))?;
        if let Some(count) = rule.remaining.as_mut() {
            *count = count.saturating_sub(1);
        }
        Some(rule.reply.clone())
    }

    /// Answers a question without consuming a use.
    ///
    /// Used for queries that must not disturb rule ordering, such as the
    /// noun classification pass at tracker construction.
    #[must_use]
    pub fn peek(&self, question: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.matches(question))
            .map(|rule| rule.reply.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
