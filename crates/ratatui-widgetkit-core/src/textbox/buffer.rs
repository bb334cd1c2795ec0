use std::collections::VecDeque;

use ratatui::style::Style;

use super::tokenize;
use crate::canvas::cell_width;

/// One queued character and the style it should be drawn with, if not the box default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextAtom {
    pub ch: char,
    pub style: Option<Style>,
}

impl TextAtom {
    pub fn new(ch: char, style: Option<Style>) -> Self {
        Self { ch, style }
    }

    pub fn newline() -> Self {
        Self::new('\n', None)
    }

    pub fn is_newline(&self) -> bool {
        self.ch == '\n'
    }
}

/// FIFO of atoms waiting to be revealed, word-wrapped for a fixed line length at append time.
///
/// Wrapping tracks a virtual column: where the next appended character would land if everything
/// queued so far were already on screen. It is independent of how far the reveal has progressed.
#[derive(Clone, Debug)]
pub struct TypewriterBuffer {
    atoms: VecDeque<TextAtom>,
    line_length: usize,
    column: usize,
}

impl TypewriterBuffer {
    pub fn new(line_length: u16) -> Self {
        Self {
            atoms: VecDeque::new(),
            line_length: line_length as usize,
            column: 0,
        }
    }

    pub fn line_length(&self) -> usize {
        self.line_length
    }

    pub fn virtual_column(&self) -> usize {
        self.column
    }

    /// Tokenizes and wraps `text`, queueing its atoms. Returns how many atoms were queued.
    pub fn append(&mut self, text: &str, style: Option<Style>) -> usize {
        let before = self.atoms.len();
        for word in tokenize::tokenize(text) {
            self.push_word(&word, style);
        }
        self.atoms.len() - before
    }

    fn push_word(&mut self, word: &str, style: Option<Style>) {
        if !tokenize::is_line_break(word) {
            let len = tokenize::visible_len(word);
            // A word that fits nowhere still gets a fresh line; it overflows from column 0.
            if self.column > 0 && self.column + len >= self.line_length {
                self.atoms.push_back(TextAtom::newline());
                self.column = 0;
            }
            if len > self.line_length {
                tracing::debug!(
                    len,
                    line_length = self.line_length,
                    "word longer than the line; it will be clipped"
                );
            }
        }

        for ch in word.chars() {
            if ch == '\n' {
                self.atoms.push_back(TextAtom::newline());
                self.column = 0;
            } else {
                self.atoms.push_back(TextAtom::new(ch, style));
                self.column += cell_width(ch) as usize;
            }
        }

        if self.column != 0 {
            self.atoms.push_back(TextAtom::new(' ', style));
            self.column += 1;
        }
    }

    pub fn pop(&mut self) -> Option<TextAtom> {
        self.atoms.pop_front()
    }

    pub fn peek(&self) -> Option<&TextAtom> {
        self.atoms.front()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextAtom> {
        self.atoms.iter()
    }

    /// Drops everything queued and restarts wrapping at column 0.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.column = 0;
    }
}
