//! In-memory conversation transcript.
//!
//! Append-only and unbounded; nothing is persisted across process runs.

use crate::domain::types::{ChatTurn, TurnRole};

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session seeded with a system turn.
    pub fn with_system(instructions: impl Into<String>) -> Self {
        let mut session = Self::new();
        session.set_system(instructions);
        session
    }

    /// Append a system turn shaping model behavior.
    pub fn set_system(&mut self, instructions: impl Into<String>) {
        self.append(TurnRole::System, instructions);
    }

    /// Append a turn unconditionally. No dedup, no size cap.
    pub fn append(&mut self, role: TurnRole, content: impl Into<String>) {
        self.turns.push(ChatTurn::new(role, content));
    }

    /// Ordered transcript for request composition.
    pub fn snapshot(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Clear the entire transcript, system turn included.
    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut session = ChatSession::with_system("be brief");
        session.append(TurnRole::User, "hi");
        session.append(TurnRole::Assistant, "hello");

        let roles: Vec<_> = session.snapshot().iter().map(|turn| turn.role).collect();
        assert_eq!(
            roles,
            vec![TurnRole::System, TurnRole::User, TurnRole::Assistant]
        );
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = ChatSession::with_system("be brief");
        session.append(TurnRole::User, "hi");
        session.reset();
        assert!(session.is_empty());
    }
}
