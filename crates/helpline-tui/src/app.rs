//! Application state and update logic for the helpline TUI.
//!
//! `App` owns the conversation exclusively; every turn enters the sequence
//! through it, always from the event-loop thread. The network half of a
//! send lives in spawned tasks managed by the run loop; their results come
//! back here through [`App::apply_reply`].

use helpline_core::{ChatReply, ClientError, Config, Conversation, UNREACHABLE_REPLY};

use crate::event::Action;
use crate::transcript::{TranscriptState, SCROLL_SPEED};
use crate::widgets::TextInputState;

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Whether the app should quit.
    pub should_quit: bool,

    /// The conversation. Append-only; other components see `&[Turn]`.
    pub conversation: Conversation,

    /// Message draft state.
    pub input: TextInputState,

    /// Transcript scroll state.
    pub transcript: TranscriptState,

    /// Number of exchanges currently in flight.
    pub pending: usize,

    /// Tick counter for animations.
    pub tick: usize,

    /// Resolved endpoint, shown in the status bar.
    pub endpoint: String,

    /// Whether the transcript shows timestamps.
    pub show_timestamps: bool,
}

impl App {
    /// Create a new app, seeding the configured greeting if present.
    pub fn new(config: &Config, endpoint: String) -> Self {
        let mut conversation = Conversation::new();
        if let Some(greeting) = &config.greeting {
            conversation.push_assistant(greeting.clone());
        }

        Self {
            should_quit: false,
            conversation,
            input: TextInputState::new(),
            transcript: TranscriptState::new(),
            pending: 0,
            tick: 0,
            endpoint,
            show_timestamps: config.show_timestamps,
        }
    }

    /// Take the draft as a message to send.
    ///
    /// Returns `None` without touching anything when the draft trims to
    /// empty; otherwise clears the draft and returns the trimmed text.
    pub fn submit_draft(&mut self) -> Option<String> {
        self.input.submit()
    }

    /// Start a send: append the user turn and count the exchange.
    ///
    /// The user's turn is in the sequence before the caller spawns the
    /// network task, so it renders ahead of any round trip. Returns `false`
    /// for empty text, in which case nothing happened and no request
    /// should be made.
    pub fn begin_send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.conversation.push_user(text);
        self.pending += 1;
        self.transcript.jump_to_bottom();
        true
    }

    /// Apply a settled exchange.
    ///
    /// Success appends the service's reply; every failure, whatever its
    /// cause, appends the one fixed fallback turn.
    pub fn apply_reply(&mut self, result: Result<ChatReply, ClientError>) {
        match result {
            Ok(reply) => {
                self.conversation.push_assistant(reply.reply);
            }
            Err(err) => {
                tracing::warn!(error = %err, "chat exchange failed");
                self.conversation.push_assistant(UNREACHABLE_REPLY);
            }
        }
        self.pending = self.pending.saturating_sub(1);
        self.transcript.jump_to_bottom();
    }

    /// Account for an exchange that vanished without a result (the task
    /// was aborted or panicked). No turn is appended.
    pub fn settle_lost_exchange(&mut self) {
        self.pending = self.pending.saturating_sub(1);
    }

    /// Handle a non-text action.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollUp => self.transcript.scroll_up(SCROLL_SPEED),
            Action::ScrollDown => self.transcript.scroll_down(SCROLL_SPEED),
            Action::PageUp => self.transcript.scroll_up(10),
            Action::PageDown => self.transcript.scroll_down(10),
            Action::JumpTop => self.transcript.jump_to_top(),
            Action::JumpBottom => self.transcript.jump_to_bottom(),
            Action::None => {}
        }
    }

    /// Increment the tick counter.
    pub fn tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpline_core::Sender;

    fn test_app() -> App {
        let config = Config {
            greeting: None,
            ..Default::default()
        };
        App::new(&config, "http://127.0.0.1:5000".into())
    }

    fn reply(text: &str) -> ChatReply {
        ChatReply {
            reply: text.into(),
            intent: None,
        }
    }

    #[test]
    fn test_greeting_seeded_from_config() {
        let config = Config::default();
        let app = App::new(&config, "http://x".into());
        assert_eq!(app.conversation.len(), 1);
        let greeting = app.conversation.last().unwrap();
        assert_eq!(greeting.sender, Sender::Assistant);
        assert!(greeting.text.contains("customer support"));
    }

    #[test]
    fn test_begin_send_appends_user_turn_synchronously() {
        let mut app = test_app();
        assert!(app.begin_send("Where is my order?"));

        // The turn is present before any exchange settles.
        assert_eq!(app.conversation.len(), 1);
        let turn = app.conversation.last().unwrap();
        assert_eq!(turn.sender, Sender::User);
        assert_eq!(turn.text, "Where is my order?");
        assert_eq!(app.pending, 1);
    }

    #[test]
    fn test_begin_send_ignores_empty_text() {
        let mut app = test_app();
        assert!(!app.begin_send(""));
        assert!(!app.begin_send("   \n  "));
        assert!(app.conversation.is_empty());
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn test_submit_draft_leaves_whitespace_buffer_alone() {
        let mut app = test_app();
        app.input.insert_str("   ");
        assert!(app.submit_draft().is_none());
        assert_eq!(app.input.content(), "   ");
    }

    #[test]
    fn test_successful_exchange_appends_reply() {
        // Scenario: ask about an order, service answers.
        let mut app = test_app();
        app.begin_send("Where is my order?");
        app.apply_reply(Ok(reply("Let me check that.")));

        let texts: Vec<&str> = app
            .conversation
            .turns()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, ["Where is my order?", "Let me check that."]);
        assert_eq!(app.conversation.last().unwrap().sender, Sender::Assistant);
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn test_any_failure_collapses_to_fixed_fallback() {
        // Whatever went wrong, the user sees one message.
        let mut app = test_app();
        app.begin_send("hi");
        app.apply_reply(Err(ClientError::Status(500)));

        app.begin_send("hi again");
        app.apply_reply(Err(ClientError::Status(404)));

        let turns = app.conversation.turns();
        assert_eq!(turns[1].text, UNREACHABLE_REPLY);
        assert_eq!(turns[3].text, UNREACHABLE_REPLY);
        assert_eq!(turns[1].sender, Sender::Assistant);
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn test_racing_sends_keep_user_order_replies_in_arrival_order() {
        let mut app = test_app();
        app.begin_send("a");
        app.begin_send("b");
        assert_eq!(app.pending, 2);

        // "b"'s reply arrives first.
        app.apply_reply(Ok(reply("reply to b")));
        app.apply_reply(Ok(reply("reply to a")));

        let texts: Vec<&str> = app
            .conversation
            .turns()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        // User turns in submission order; replies in arrival order.
        assert_eq!(texts, ["a", "b", "reply to b", "reply to a"]);
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn test_prior_turns_survive_later_exchanges() {
        let mut app = test_app();
        app.begin_send("first");
        let snapshot = app.conversation.turns()[0].clone();

        app.apply_reply(Ok(reply("ok")));
        app.begin_send("second");
        app.apply_reply(Err(ClientError::Status(500)));

        assert_eq!(app.conversation.turns()[0], snapshot);
    }

    #[test]
    fn test_lost_exchange_appends_nothing() {
        let mut app = test_app();
        app.begin_send("hi");
        app.settle_lost_exchange();
        assert_eq!(app.conversation.len(), 1);
        assert_eq!(app.pending, 0);
    }

    #[test]
    fn test_quit_action() {
        let mut app = test_app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_scroll_actions_drive_transcript_state() {
        let mut app = test_app();
        app.handle_action(Action::ScrollUp);
        assert!(!app.transcript.is_following());

        app.handle_action(Action::JumpBottom);
        assert!(app.transcript.is_following());
    }
}
