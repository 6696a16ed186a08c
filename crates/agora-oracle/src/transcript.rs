//! Running transcript of one bookkeeping pass.
//!
//! Every oracle interrogation during an update is appended here in order:
//! framing statements, each question asked, and the raw answer received.
//! The transcript doubles as the context block for LLM-backed queries and
//! as the audit log attached to the finished update record.

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Ordered log of statements, questions, and answers.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Appends a framing statement verbatim.
    pub fn statement(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Appends a question line.
    pub fn question(&mut self, text: &str) {
        self.lines.push(format!("Question: {text}"));
    }

    /// Appends an answer line.
    pub fn answer(&mut self, text: &str) {
        self.lines.push(format!("Answer: {text}"));
    }

    /// All lines recorded so far, in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines recorded.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Renders the transcript as one newline-joined block.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn records_lines_in_order() {
        let mut transcript = Transcript::new();
        transcript.statement("Alice bought wood.");
        transcript.question("How much wood did Alice gain?");
        transcript.answer("3");

        assert_eq!(
            transcript.lines(),
            &[
                "Alice bought wood.".to_owned(),
                "Question: How much wood did Alice gain?".to_owned(),
                "Answer: 3".to_owned(),
            ]
        );
        assert_eq!(transcript.len(), 3);
        assert!(!transcript.is_empty());
    }

    #[test]
    fn render_joins_with_newlines() {
        let mut transcript = Transcript::new();
        transcript.statement("first");
        transcript.statement("second");
        assert_eq!(transcript.render(), "first\nsecond");
    }

    #[test]
    fn starts_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.render(), "");
    }
}
