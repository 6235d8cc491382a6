//! Draft buffer state for the input bar.
//!
//! Tracks content and a cursor measured in characters (not bytes), so
//! multi-byte input never splits a code point. Submitted drafts go into a
//! small history navigable with Up/Down while the draft is empty.

/// State for the message draft: content, cursor, and submit history.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    content: String,
    /// Cursor position as a character index into `content`.
    cursor: usize,
    history: Vec<String>,
    /// Position while browsing history; `None` means editing the live draft.
    history_index: Option<usize>,
    /// Live draft saved while browsing history.
    saved_draft: String,
}

impl TextInputState {
    /// Create a new empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current draft content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if the draft is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Byte offset for a character index.
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_idx)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert a string at the cursor.
    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.content.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Move cursor left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end.
    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clear the draft.
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Submit the draft.
    ///
    /// A draft that trims to nothing is not a submission: nothing is
    /// returned and the buffer is left exactly as it was. Otherwise the
    /// trimmed text is returned, recorded in history, and the buffer
    /// cleared.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.content.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.to_string();
        self.history.push(text.clone());
        self.clear();
        self.history_index = None;
        self.saved_draft.clear();
        Some(text)
    }

    /// Recall the previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next_index = match self.history_index {
            None => {
                self.saved_draft = std::mem::take(&mut self.content);
                self.history.len() - 1
            }
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.history_index = Some(next_index);
        self.content = self.history[next_index].clone();
        self.cursor = self.char_count();
    }

    /// Move back toward the live draft.
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.content = self.history[i + 1].clone();
                self.cursor = self.char_count();
            }
            Some(_) => {
                self.history_index = None;
                self.content = std::mem::take(&mut self.saved_draft);
                self.cursor = self.char_count();
            }
        }
    }
}
