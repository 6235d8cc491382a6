//! Full-width input bar widget.
//!
//! Always visible at the bottom of the screen. Multi-line drafts grow the
//! bar; Shift+Enter (or Ctrl+J) inserts the line breaks.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::Theme;
use crate::widgets::TextInputState;

/// Placeholder shown while the draft is empty.
const PLACEHOLDER: &str = "Type your message... (Press Enter to send)";

/// Prompt prefix on the first draft line.
const PROMPT: &str = "> ";

/// Full-width input bar for the message draft.
pub struct InputBar<'a> {
    input: &'a TextInputState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    /// Create a new input bar widget.
    pub fn new(input: &'a TextInputState, theme: &'a Theme) -> Self {
        Self { input, theme }
    }

    /// Lines the bar needs including its border.
    pub fn required_height(input: &TextInputState, max: u16) -> u16 {
        let draft_lines = input.content().split('\n').count().max(1) as u16;
        (draft_lines + 2).clamp(3, max.max(3))
    }

    /// Build display lines: prompt prefix, draft content, cursor block.
    fn build_lines(&self) -> Vec<Line<'static>> {
        if self.input.is_empty() {
            return vec![Line::from(vec![
                Span::styled(PROMPT.to_string(), Style::default().fg(self.theme.user)),
                Span::styled("█", Style::default().fg(self.theme.text)),
                Span::styled(PLACEHOLDER.to_string(), Style::default().fg(self.theme.muted)),
            ])];
        }

        let cursor = self.input.cursor();
        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = vec![Span::styled(
            PROMPT.to_string(),
            Style::default().fg(self.theme.user),
        )];
        let mut cursor_drawn = false;

        for (idx, ch) in self.input.content().chars().enumerate() {
            if idx == cursor && !cursor_drawn {
                spans.push(Span::styled("█", Style::default().fg(self.theme.text)));
                cursor_drawn = true;
            }
            if ch == '\n' {
                lines.push(Line::from(std::mem::take(&mut spans)));
                // Continuation lines align under the prompt
                spans.push(Span::raw(" ".repeat(PROMPT.len())));
            } else {
                spans.push(Span::styled(
                    ch.to_string(),
                    Style::default().fg(self.theme.text),
                ));
            }
        }

        if !cursor_drawn {
            spans.push(Span::styled("█", Style::default().fg(self.theme.text)));
        }
        lines.push(Line::from(spans));
        lines
    }
}

impl Widget for InputBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_focused));

        let inner_height = area.height.saturating_sub(2) as usize;
        let lines = self.build_lines();

        // Keep the cursor line (always the last line containing it) visible.
        let scroll_offset = lines.len().saturating_sub(inner_height.max(1));

        #[allow(clippy::cast_possible_truncation)]
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().bg(self.theme.base))
            .scroll((scroll_offset as u16, 0))
            .render(area, buf);
    }
}
