use phf::phf_map;

use crate::errors::{ExpressionError, MakeResult};

/// Characters that may follow a `\`. Anything else is an invalid escape.
static ESCAPES: phf::Map<char, char> = phf_map! {
    'n' => '\n',
    't' => '\t',
    'r' => '\r',
    '\\' => '\\',
    '\'' => '\'',
    '"' => '"',
    '$' => '$',
    '(' => '(',
    ')' => ')',
    '[' => '[',
    ']' => ']',
    '-' => '-',
    ':' => ':',
    ' ' => ' ',
};

/// A single forward pass over one piece of text. Offsets are byte offsets.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Cursor { src, pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn remaining(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Consume a `\` and the escaped character after it.
    pub(crate) fn escape(&mut self) -> MakeResult<char> {
        let offset = self.pos;
        debug_assert_eq!(self.peek(), Some('\\'));
        self.bump();
        let escaped = self
            .bump()
            .ok_or(ExpressionError::DanglingEscape { offset })?;
        ESCAPES
            .get(&escaped)
            .copied()
            .ok_or_else(|| ExpressionError::InvalidEscape { escaped, offset }.into())
    }

    pub(crate) fn invalid_character(&self, character: char) -> ExpressionError {
        ExpressionError::InvalidCharacter {
            character,
            offset: self.pos,
            remaining: self.remaining().to_string(),
        }
    }
}
