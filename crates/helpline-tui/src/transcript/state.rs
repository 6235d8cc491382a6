//! Transcript scroll state.
//!
//! Scrolling is explicit state, separate from rendering: the widget only
//! clamps the offset to what actually fits. While `follow` is set the view
//! sticks to the newest turn; any manual scroll up breaks follow, and
//! jumping to the bottom restores it.

/// Lines scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// Scroll state for the transcript pane.
#[derive(Debug)]
pub struct TranscriptState {
    /// First visible line.
    scroll: usize,
    /// Whether to stick to the newest turn.
    follow: bool,
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self {
            scroll: 0,
            follow: true,
        }
    }
}

impl TranscriptState {
    /// Create a new state in follow mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scroll offset in lines.
    pub fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Check if follow mode is enabled.
    pub fn is_following(&self) -> bool {
        self.follow
    }

    /// Scroll up by the given number of lines. Disables follow mode.
    pub fn scroll_up(&mut self, amount: usize) {
        self.follow = false;
        self.scroll = self.scroll.saturating_sub(amount);
    }

    /// Scroll down by the given number of lines (clamped at render time).
    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll = self.scroll.saturating_add(amount);
    }

    /// Jump to the oldest turn. Disables follow mode.
    pub fn jump_to_top(&mut self) {
        self.follow = false;
        self.scroll = 0;
    }

    /// Jump to the newest turn. Re-enables follow mode.
    pub fn jump_to_bottom(&mut self) {
        self.follow = true;
    }

    /// Clamp the offset against rendered content.
    ///
    /// Called by the widget once it knows how many lines exist and fit.
    /// In follow mode the offset snaps to the bottom.
    pub(crate) fn clamp(&mut self, max_scroll: usize) {
        if self.follow {
            self.scroll = max_scroll;
        } else {
            self.scroll = self.scroll.min(max_scroll);
        }
    }
}
