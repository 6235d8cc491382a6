//! Transcript pane: scrollable, auto-following view of the conversation.

mod state;
mod widget;

pub use state::{TranscriptState, SCROLL_SPEED};
pub use widget::TranscriptWidget;
