// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Seqnotes and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// A plain-text buffer with a single cursor.
///
/// The cursor is a byte offset that always sits on a `char` boundary. The buffer knows nothing
/// about diagram syntax; auto-indent only copies whitespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptBuffer {
    text: String,
    cursor: usize,
    rev: u64,
}

impl ScriptBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), cursor: 0, rev: 0 }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// `(line, column)` of the cursor, both zero-based; the column counts chars.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let before = &self.text[..self.cursor];
        let line = before.matches('\n').count();
        let col = before[line_start(before, before.len())..].chars().count();
        (line, col)
    }

    /// Replaces the whole text and puts the cursor at the start.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = 0;
        self.bump();
    }

    /// Moves the cursor to `offset`, clamped to the text and snapped back to a char boundary.
    pub fn set_cursor(&mut self, offset: usize) {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.cursor = offset;
    }

    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.bump();
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.bump();
    }

    /// Breaks the line at the cursor and indents the new line like the current one.
    ///
    /// Only the whitespace left of the cursor is copied, so breaking inside the indentation
    /// does not grow it. The cursor ends up right after the inserted indentation.
    pub fn insert_newline(&mut self) {
        let start = line_start(&self.text, self.cursor);
        let indent = leading_whitespace(&self.text[start..self.cursor]).to_owned();
        let mut inserted = String::with_capacity(1 + indent.len());
        inserted.push('\n');
        inserted.push_str(&indent);
        self.insert_str(&inserted);
    }

    pub fn backspace(&mut self) {
        let Some(ch) = self.text[..self.cursor].chars().next_back() else {
            return;
        };
        self.cursor -= ch.len_utf8();
        self.text.remove(self.cursor);
        self.bump();
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            self.bump();
        }
    }

    pub fn move_left(&mut self) {
        if let Some(ch) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = line_start(&self.text, self.cursor);
    }

    pub fn move_end(&mut self) {
        self.cursor = line_end(&self.text, self.cursor);
    }

    pub fn move_up(&mut self) {
        let start = line_start(&self.text, self.cursor);
        if start == 0 {
            self.cursor = 0;
            return;
        }
        let col = self.text[start..self.cursor].chars().count();
        let prev_start = line_start(&self.text, start - 1);
        self.cursor = offset_at_col(&self.text, prev_start, start - 1, col);
    }

    pub fn move_down(&mut self) {
        let start = line_start(&self.text, self.cursor);
        let end = line_end(&self.text, self.cursor);
        if end == self.text.len() {
            self.cursor = end;
            return;
        }
        let col = self.text[start..self.cursor].chars().count();
        let next_start = end + 1;
        let next_end = line_end(&self.text, next_start);
        self.cursor = offset_at_col(&self.text, next_start, next_end, col);
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}

fn line_start(text: &str, offset: usize) -> usize {
    text[..offset].rfind('\n').map_or(0, |idx| idx + 1)
}

fn line_end(text: &str, offset: usize) -> usize {
    text[offset..].find('\n').map_or(text.len(), |idx| offset + idx)
}

fn leading_whitespace(line: &str) -> &str {
    let end = line.find(|c: char| c != ' ' && c != '\t').unwrap_or(line.len());
    &line[..end]
}

fn offset_at_col(text: &str, start: usize, end: usize, col: usize) -> usize {
    text[start..end].char_indices().nth(col).map_or(end, |(idx, _)| start + idx)
}
