use derive_more::Display;
use tracing::trace;

use crate::call::{parse_call, parse_quoted};
use crate::context::Context;
use crate::cursor::Cursor;
use crate::errors::{ExpressionError, MakeResult};
use crate::value::Value;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum Token {
    #[display("end of expression")]
    End,
    #[display("||")]
    Or,
    #[display("&&")]
    And,
    #[display("==")]
    Eq,
    #[display("!")]
    Not,
    #[display("!=")]
    Ne,
    #[display("<")]
    Lt,
    #[display(">")]
    Gt,
    #[display("<=")]
    Le,
    #[display(">=")]
    Ge,
    #[display("(")]
    LeftParen,
    #[display(")")]
    RightParen,
    #[display("'{_0}'")]
    Value(Value),
}

/// Characters that may make up an unquoted literal such as `1.2.3`, `x86_64` or `-O2`.
fn is_literal_char(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            '_' | '.' | '-' | '+' | '/' | ':' | '~' | '@' | '%' | '#' | ',' | '*' | '?'
        )
}

/// Produces tokens one at a time from a single expression. Calls embedded in the expression run
/// while it is being tokenized.
pub struct Tokenizer<'a> {
    context: &'a dyn Context,
    cursor: Cursor<'a>,
    pushed_back: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(context: &'a dyn Context, expression: &'a str) -> Self {
        Tokenizer {
            context,
            cursor: Cursor::new(expression),
            pushed_back: Vec::new(),
        }
    }

    /// Return `token` from the next call to [`Tokenizer::next_token`], ahead of unread input.
    pub fn push_back(&mut self, token: Token) {
        self.pushed_back.push(token);
    }

    pub fn next_token(&mut self) -> MakeResult<Token> {
        if let Some(token) = self.pushed_back.pop() {
            return Ok(token);
        }

        let token = self.scan()?;
        trace!(%token, offset = self.cursor.position(), "token");
        Ok(token)
    }

    fn scan(&mut self) -> MakeResult<Token> {
        self.cursor.skip_whitespace();
        let Some(c) = self.cursor.peek() else {
            return Ok(Token::End);
        };

        let token = match c {
            '|' => self.pair('|', Token::Or)?,
            '&' => self.pair('&', Token::And)?,
            '=' => self.pair('=', Token::Eq)?,
            '!' => self.with_optional_equals(Token::Ne, Token::Not),
            '<' => self.with_optional_equals(Token::Le, Token::Lt),
            '>' => self.with_optional_equals(Token::Ge, Token::Gt),
            '(' => {
                self.cursor.bump();
                Token::LeftParen
            }
            ')' => {
                self.cursor.bump();
                Token::RightParen
            }
            '\'' => Token::Value(Value::string(parse_quoted(
                &mut self.cursor,
                self.context,
            )?)),
            '$' => Token::Value(parse_call(&mut self.cursor, self.context)?),
            c if c == '\\' || is_literal_char(c) => Token::Value(self.literal()?),
            c => return Err(self.cursor.invalid_character(c).into()),
        };
        Ok(token)
    }

    /// A two character operator made of `c` twice.
    fn pair(&mut self, c: char, token: Token) -> MakeResult<Token> {
        let offset = self.cursor.position();
        let remaining = self.cursor.remaining();
        self.cursor.bump();
        if self.cursor.eat(c) {
            Ok(token)
        } else {
            Err(ExpressionError::IncompleteOperator {
                expected: c,
                offset,
                remaining: remaining.to_string(),
            }
            .into())
        }
    }

    fn with_optional_equals(&mut self, with: Token, without: Token) -> Token {
        self.cursor.bump();
        if self.cursor.eat('=') {
            with
        } else {
            without
        }
    }

    /// An unquoted literal. Escapes, quoted strings and calls inside it are concatenated with
    /// the plain text around them.
    fn literal(&mut self) -> MakeResult<Value> {
        let mut text = String::new();
        loop {
            match self.cursor.peek() {
                Some('\\') => text.push(self.cursor.escape()?),
                Some('\'') => text.push_str(&parse_quoted(&mut self.cursor, self.context)?),
                Some('$') => {
                    text.push_str(&parse_call(&mut self.cursor, self.context)?.to_string())
                }
                Some(c) if is_literal_char(c) => {
                    text.push(c);
                    self.cursor.bump();
                }
                _ => return Ok(Value::string(text)),
            }
        }
    }
}
