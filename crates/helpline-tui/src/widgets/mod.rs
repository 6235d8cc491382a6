//! Shared widgets for the helpline TUI.

mod input_bar;
mod status_bar;
mod text_input;

pub use input_bar::InputBar;
pub use status_bar::StatusBar;
pub use text_input::TextInputState;
