//! One-line status bar: endpoint, in-flight indicator, key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Spinner frames for the waiting indicator.
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const HINTS: &str = "Enter send · Shift+Enter newline · PgUp/PgDn scroll · Ctrl+C quit";

/// Bottom status bar.
pub struct StatusBar<'a> {
    theme: &'a Theme,
    endpoint: &'a str,
    /// Number of exchanges currently awaiting a reply.
    pending: usize,
    /// Tick counter driving the spinner animation.
    tick: usize,
    following: bool,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar.
    pub fn new(theme: &'a Theme, endpoint: &'a str) -> Self {
        Self {
            theme,
            endpoint,
            pending: 0,
            tick: 0,
            following: true,
        }
    }

    /// Set the in-flight exchange count and animation tick.
    #[must_use]
    pub fn pending(mut self, pending: usize, tick: usize) -> Self {
        self.pending = pending;
        self.tick = tick;
        self
    }

    /// Set whether the transcript is following the newest turn.
    #[must_use]
    pub fn following(mut self, following: bool) -> Self {
        self.following = following;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(" helpline ", Style::default().fg(self.theme.user)),
            Span::styled(self.endpoint, Style::default().fg(self.theme.muted)),
        ];

        if self.pending > 0 {
            let frame = SPINNER[self.tick % SPINNER.len()];
            let label = if self.pending == 1 {
                format!("  {frame} waiting for reply")
            } else {
                format!("  {frame} waiting for {} replies", self.pending)
            };
            spans.push(Span::styled(
                label,
                Style::default().fg(self.theme.assistant),
            ));
        }

        if !self.following {
            spans.push(Span::styled(
                "  [scrolled]",
                Style::default().fg(self.theme.subtext),
            ));
        }

        // Right-align the hints when there is room.
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let hints_width = HINTS.width();
        let total = area.width as usize;
        if used + hints_width + 2 <= total {
            spans.push(Span::raw(" ".repeat(total - used - hints_width - 1)));
            spans.push(Span::styled(HINTS, Style::default().fg(self.theme.muted)));
        }

        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
