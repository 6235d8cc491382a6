//! Conversation state: an append-only sequence of turns.
//!
//! The conversation is owned by exactly one controller; renderers get a
//! read-only slice. Turns are never mutated or removed after creation, and
//! display order is append order.

use chrono::{DateTime, Local, Utc};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// The person typing at the terminal.
    User,
    /// The remote support assistant (or the local fallback on its behalf).
    Assistant,
}

/// A single message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Session-unique identifier, assigned from a monotonic counter.
    pub id: u64,
    /// Turn author.
    pub sender: Sender,
    /// Message content. May contain embedded newlines; renderers must
    /// preserve them.
    pub text: String,
    /// When the turn was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    fn new(id: u64, sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Timestamp formatted for display (HH:MM in local time).
    pub fn time_str(&self) -> String {
        let local: DateTime<Local> = self.timestamp.into();
        local.format("%H:%M").to_string()
    }

    /// Whether this turn came from the user.
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Append-only ordered sequence of turns.
///
/// Identifiers come from a per-session counter rather than wall-clock time,
/// so two turns created in the same instant can never collide.
#[derive(Debug, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
    next_id: u64,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// All turns, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if the conversation has no turns yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Append a user turn. Returns the assigned id.
    pub fn push_user(&mut self, text: impl Into<String>) -> u64 {
        self.push(Sender::User, text)
    }

    /// Append an assistant turn. Returns the assigned id.
    pub fn push_assistant(&mut self, text: impl Into<String>) -> u64 {
        self.push(Sender::Assistant, text)
    }

    // Single mutation path: every turn enters the sequence here.
    fn push(&mut self, sender: Sender, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.turns.push(Turn::new(id, sender, text));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_preserves_order() {
        let mut convo = Conversation::new();
        convo.push_user("Where is my order?");
        convo.push_assistant("Let me check that.");
        convo.push_user("Thanks");

        let texts: Vec<&str> = convo.turns().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["Where is my order?", "Let me check that.", "Thanks"]);
        assert_eq!(convo.len(), 3);
    }

    #[test]
    fn test_ids_are_unique_and_monotonic() {
        let mut convo = Conversation::new();
        for _ in 0..100 {
            convo.push_user("hi");
        }
        let ids: Vec<u64> = convo.turns().iter().map(|t| t.id).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_prior_turns_unchanged_by_later_appends() {
        let mut convo = Conversation::new();
        convo.push_user("first");
        let snapshot = convo.turns()[0].clone();

        convo.push_assistant("second");
        convo.push_user("third");

        assert_eq!(convo.turns()[0], snapshot);
    }

    #[test]
    fn test_sender_helpers() {
        let mut convo = Conversation::new();
        convo.push_user("q");
        convo.push_assistant("a");
        assert!(convo.turns()[0].is_user());
        assert!(!convo.turns()[1].is_user());
        assert_eq!(convo.last().map(|t| t.sender), Some(Sender::Assistant));
    }

    #[test]
    fn test_multiline_text_kept_verbatim() {
        let mut convo = Conversation::new();
        convo.push_assistant("You may like:\nWidget A\nWidget B");
        assert_eq!(convo.last().unwrap().text.lines().count(), 3);
    }

    #[test]
    fn test_time_str_format() {
        let mut convo = Conversation::new();
        convo.push_user("hi");
        let time_str = convo.last().unwrap().time_str();
        assert_eq!(time_str.len(), 5);
        assert!(time_str.contains(':'));
    }
}
