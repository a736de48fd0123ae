use docqa_core::types::Turn;

/// Chat transcript for one front-end session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self { Self::default() }

    pub fn push_user(&mut self, text: impl Into<String>) { self.turns.push(Turn::human(text)); }

    pub fn push_assistant(&mut self, text: impl Into<String>) { self.turns.push(Turn::ai(text)); }

    pub fn turns(&self) -> &[Turn] { &self.turns }

    pub fn clear(&mut self) { self.turns.clear(); }
}
