// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Cursor-addressed text input used for the working buffer and the instruction line.
///
/// The cursor is a character index into `text`, always on a char boundary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
    multiline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferEdit {
    Insert(char),
    Newline,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

impl TextBuffer {
    pub fn multiline(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor, multiline: true }
    }

    pub fn single_line() -> Self {
        Self { text: String::new(), cursor: 0, multiline: false }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the whole text and parks the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let mut text = text.into();
        if !self.multiline {
            text = text.replace('\n', " ");
        }
        self.cursor = text.chars().count();
        self.text = text;
    }

    /// Cursor as `(line, column)`.
    pub fn cursor_position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for ch in self.text.chars().take(self.cursor) {
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    pub fn apply(&mut self, edit: BufferEdit) {
        match edit {
            BufferEdit::Insert('\n') | BufferEdit::Newline => {
                if self.multiline {
                    self.insert('\n');
                }
            }
            BufferEdit::Insert(ch) => self.insert(ch),
            BufferEdit::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at_cursor();
                }
            }
            BufferEdit::Delete => self.remove_at_cursor(),
            BufferEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            BufferEdit::Right => self.cursor = (self.cursor + 1).min(self.char_len()),
            BufferEdit::Home => self.cursor = self.line_start(self.cursor),
            BufferEdit::End => self.cursor = self.line_end(self.cursor),
            BufferEdit::Up => self.move_vertically(false),
            BufferEdit::Down => self.move_vertically(true),
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text.char_indices().nth(char_index).map_or(self.text.len(), |(index, _)| index)
    }

    fn insert(&mut self, ch: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    fn remove_at_cursor(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    fn line_start(&self, from: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut index = from.min(chars.len());
        while index > 0 && chars[index - 1] != '\n' {
            index -= 1;
        }
        index
    }

    fn line_end(&self, from: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut index = from.min(chars.len());
        while index < chars.len() && chars[index] != '\n' {
            index += 1;
        }
        index
    }

    fn move_vertically(&mut self, down: bool) {
        let start = self.line_start(self.cursor);
        let column = self.cursor - start;
        let target_start = if down {
            let end = self.line_end(self.cursor);
            if end >= self.char_len() {
                return;
            }
            end + 1
        } else {
            if start == 0 {
                return;
            }
            self.line_start(start - 1)
        };
        let target_end = self.line_end(target_start);
        self.cursor = (target_start + column).min(target_end);
    }
}
