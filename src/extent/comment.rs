//! Marker-comment scanning over raw source text.
//!
//! syn drops regular comments during parsing, so annotation extents come
//! from a direct scan that understands line comments, nested block comments
//! and string/char literals (a marker inside a string is not an annotation).

use super::Extent;

/// Returns the span of every comment whose text contains `marker`.
#[must_use]
pub fn annotation_extents(content: &str, marker: &str) -> Vec<Extent> {
    Scanner::new(content).scan(marker)
}

struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
}

impl Scanner {
    fn new(content: &str) -> Self {
        Self {
            chars: content.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn scan(mut self, marker: &str) -> Vec<Extent> {
        let mut extents = Vec::new();
        while let Some(c) = self.peek(0) {
            match c {
                '/' if self.peek(1) == Some('/') => {
                    if let Some(extent) = self.line_comment(marker) {
                        extents.push(extent);
                    }
                }
                '/' if self.peek(1) == Some('*') => {
                    if let Some(extent) = self.block_comment(marker) {
                        extents.push(extent);
                    }
                }
                '"' => self.string_literal(),
                'r' if self.raw_string_ahead() => self.raw_string(),
                '\'' => self.char_or_lifetime(),
                _ => {
                    self.bump();
                }
            }
        }
        extents
    }

    fn line_comment(&mut self, marker: &str) -> Option<Extent> {
        let (start_line, start_col) = (self.line, self.col);
        let mut end_col = self.col;
        let mut text = String::new();
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                break;
            }
            text.push(c);
            end_col = self.col;
            self.bump();
        }
        text.contains(marker).then_some(Extent {
            start_line,
            start_col,
            end_line: start_line,
            end_col,
        })
    }

    // Rust block comments nest.
    fn block_comment(&mut self, marker: &str) -> Option<Extent> {
        let (start_line, start_col) = (self.line, self.col);
        self.bump();
        self.bump();

        let mut depth = 1u32;
        let mut text = String::new();
        let (mut end_line, mut end_col) = (self.line, self.col);
        while depth > 0 {
            match (self.peek(0), self.peek(1)) {
                (Some('/'), Some('*')) => {
                    depth += 1;
                    self.bump();
                    self.bump();
                }
                (Some('*'), Some('/')) => {
                    depth -= 1;
                    self.bump();
                    end_line = self.line;
                    end_col = self.col;
                    self.bump();
                }
                (Some(c), _) => {
                    text.push(c);
                    self.bump();
                }
                (None, _) => break, // unterminated, let syn report it
            }
        }
        text.contains(marker).then_some(Extent {
            start_line,
            start_col,
            end_line,
            end_col,
        })
    }

    fn string_literal(&mut self) {
        self.bump();
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '"' => break,
                _ => {}
            }
        }
    }

    fn raw_string_ahead(&self) -> bool {
        let mut i = 1;
        while self.peek(i) == Some('#') {
            i += 1;
        }
        self.peek(i) == Some('"')
    }

    fn raw_string(&mut self) {
        self.bump();
        let mut hashes = 0usize;
        while self.peek(0) == Some('#') {
            hashes += 1;
            self.bump();
        }
        self.bump();
        while let Some(c) = self.bump() {
            if c == '"' && (0..hashes).all(|i| self.peek(i) == Some('#')) {
                for _ in 0..hashes {
                    self.bump();
                }
                break;
            }
        }
    }

    // Distinguish 'a' (char literal) from 'a (lifetime or loop label).
    fn char_or_lifetime(&mut self) {
        if self.peek(1) == Some('\\') {
            self.bump();
            self.bump();
            self.bump();
            while let Some(c) = self.bump() {
                if c == '\'' {
                    break;
                }
            }
        } else if self.peek(2) == Some('\'') {
            self.bump();
            self.bump();
            self.bump();
        } else {
            self.bump();
        }
    }
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;
