/// A single exam question, immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    /// Text of the correct option, always a member of `options`. `None`
    /// only for a trailing block that reached end of input without a `~C`
    /// line under lenient parsing.
    pub answer: Option<String>,
}

impl Question {
    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer.as_deref() == Some(selected)
    }
}

/// The choice a user made for one question. Recorded once, read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub selected: String,
    pub correct: bool,
}
