//! Transcript widget: renders the turn sequence as chat bubbles.
//!
//! User turns are right-aligned in the accent color, assistant turns
//! left-aligned and neutral. Embedded line breaks are preserved; long
//! lines wrap to at most 70% of the pane width, mirroring a familiar
//! chat layout.

use helpline_core::Turn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::state::TranscriptState;
use crate::theme::Theme;

/// Transcript pane widget.
pub struct TranscriptWidget<'a> {
    turns: &'a [Turn],
    theme: &'a Theme,
    show_timestamps: bool,
}

impl<'a> TranscriptWidget<'a> {
    /// Create a new transcript widget.
    pub fn new(turns: &'a [Turn], theme: &'a Theme) -> Self {
        Self {
            turns,
            theme,
            show_timestamps: true,
        }
    }

    /// Set whether per-turn timestamps are rendered.
    #[must_use]
    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }
}

/// Build the display lines for a turn sequence at the given pane width.
///
/// Turns appear strictly in slice order; each contributes a header line,
/// its wrapped content lines, and a trailing gap line.
pub(crate) fn transcript_lines(
    turns: &[Turn],
    theme: &Theme,
    width: usize,
    show_timestamps: bool,
) -> Vec<Line<'static>> {
    let width = width.max(8);
    let bubble_width = (width * 7 / 10).max(8);

    let mut lines = Vec::new();
    for turn in turns {
        let (label, accent) = if turn.is_user() {
            ("You", theme.user)
        } else {
            ("Assistant", theme.assistant)
        };

        // Header: "label · HH:MM", right-aligned for user turns.
        let mut header = String::from(label);
        if show_timestamps {
            header.push_str(" · ");
            header.push_str(&turn.time_str());
        }
        let header_span = Span::styled(header.clone(), Style::default().fg(theme.muted));
        if turn.is_user() {
            let pad = width.saturating_sub(header.width());
            lines.push(Line::from(vec![Span::raw(" ".repeat(pad)), header_span]));
        } else {
            lines.push(Line::from(header_span));
        }

        // Content: split on embedded newlines first so blank lines survive,
        // then wrap each piece to the bubble width.
        let text_style = if turn.is_user() {
            Style::default().fg(theme.user)
        } else {
            Style::default().fg(theme.text)
        };
        for raw_line in turn.text.split('\n') {
            let wrapped: Vec<String> = if raw_line.is_empty() {
                vec![String::new()]
            } else {
                textwrap::wrap(raw_line, bubble_width)
                    .into_iter()
                    .map(std::borrow::Cow::into_owned)
                    .collect()
            };
            for piece in wrapped {
                if turn.is_user() {
                    let pad = width.saturating_sub(piece.width());
                    lines.push(Line::from(vec![
                        Span::raw(" ".repeat(pad)),
                        Span::styled(piece, text_style),
                    ]));
                } else {
                    lines.push(Line::from(Span::styled(piece, text_style)));
                }
            }
        }

        // Gap between turns
        lines.push(Line::default());
    }
    lines
}

impl StatefulWidget for TranscriptWidget<'_> {
    type State = TranscriptState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Block::default()
            .title(" Conversation ")
            .title_style(Style::default().fg(self.theme.text))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .style(Style::default().bg(self.theme.base));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let lines = transcript_lines(
            self.turns,
            self.theme,
            inner.width as usize,
            self.show_timestamps,
        );
        let max_scroll = lines.len().saturating_sub(inner.height as usize);
        state.clamp(max_scroll);

        #[allow(clippy::cast_possible_truncation)]
        Paragraph::new(lines)
            .scroll((state.scroll_offset() as u16, 0))
            .render(inner, buf);
    }
}
