//! The embedded call grammar:
//!
//! ```text
//! call       := '$' '(' identifier parameter* ')'
//! identifier := (name-char | quoted | escape | call)+ [ws* '[' digits ']']
//! parameter  := '-' option [':' value]
//! ```
//!
//! Quoted text, escapes and nested calls may appear anywhere in an identifier, option or value,
//! and are concatenated with the surrounding text. A call is executed as soon as it has been
//! parsed.

use crate::context::Context;
use crate::cursor::Cursor;
use crate::errors::{ExpressionError, MakeResult};
use crate::function::{Identifier, Parameter, Parameters, exec};
use crate::value::Value;

/// Parse `'...'` starting at the opening quote and return its contents with escapes resolved and
/// nested calls substituted.
pub(crate) fn parse_quoted(cursor: &mut Cursor, context: &dyn Context) -> MakeResult<String> {
    let offset = cursor.position();
    let remaining = cursor.remaining();
    debug_assert_eq!(cursor.peek(), Some('\''));
    cursor.bump();

    let mut text = String::new();
    loop {
        match cursor.peek() {
            None => {
                return Err(ExpressionError::UnterminatedQuote {
                    offset,
                    remaining: remaining.to_string(),
                }
                .into());
            }
            Some('\'') => {
                cursor.bump();
                return Ok(text);
            }
            Some('\\') => text.push(cursor.escape()?),
            Some('$') => text.push_str(&parse_call(cursor, context)?.to_string()),
            Some(c) => {
                text.push(c);
                cursor.bump();
            }
        }
    }
}

/// Parse and execute `$(...)`, starting at the `$`.
pub(crate) fn parse_call(cursor: &mut Cursor, context: &dyn Context) -> MakeResult<Value> {
    debug_assert_eq!(cursor.peek(), Some('$'));
    cursor.bump();
    if !cursor.eat('(') {
        return Err(ExpressionError::MissingOpenParenthesis {
            offset: cursor.position(),
            remaining: cursor.remaining().to_string(),
        }
        .into());
    }

    cursor.skip_whitespace();
    let identifier = parse_identifier(cursor, context)?;
    let parameters = parse_parameters(cursor, context)?;
    exec(context, &identifier, &parameters)
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Append a quoted string, an escape, or a nested call to `text` if one starts at the cursor.
/// Returns false if the cursor is at none of those.
fn substitution(cursor: &mut Cursor, context: &dyn Context, text: &mut String) -> MakeResult<bool> {
    match cursor.peek() {
        Some('\'') => text.push_str(&parse_quoted(cursor, context)?),
        Some('\\') => text.push(cursor.escape()?),
        Some('$') => text.push_str(&parse_call(cursor, context)?.to_string()),
        _ => return Ok(false),
    }
    Ok(true)
}

fn parse_identifier(cursor: &mut Cursor, context: &dyn Context) -> MakeResult<Identifier> {
    let offset = cursor.position();
    let remaining = cursor.remaining();

    let mut name = String::new();
    loop {
        match cursor.peek() {
            Some(c) if is_name_char(c) => {
                name.push(c);
                cursor.bump();
            }
            _ => {
                if !substitution(cursor, context, &mut name)? {
                    break;
                }
            }
        }
    }

    cursor.skip_whitespace();
    let index = match cursor.peek() {
        Some('[') => Some(parse_index(cursor)?),
        _ => None,
    };

    if name.is_empty() {
        return Err(ExpressionError::MissingIdentifier {
            offset,
            remaining: remaining.to_string(),
        }
        .into());
    }

    Ok(Identifier { name, index })
}

fn parse_index(cursor: &mut Cursor) -> MakeResult<usize> {
    let offset = cursor.position();
    let remaining = cursor.remaining();
    cursor.bump();

    let start = cursor.position();
    loop {
        match cursor.peek() {
            Some(']') => break,
            Some(_) => {
                cursor.bump();
            }
            None => {
                return Err(ExpressionError::MissingCloseBracket {
                    offset,
                    remaining: remaining.to_string(),
                }
                .into());
            }
        }
    }
    let index = &remaining[start - offset..cursor.position() - offset];
    cursor.bump();

    index
        .trim()
        .parse::<usize>()
        .map_err(|_| {
            ExpressionError::InvalidIndex {
                index: index.to_string(),
                offset,
            }
            .into()
        })
}

/// Read an option name or value up to (not including) a character accepted by `end`.
fn parse_word(
    cursor: &mut Cursor,
    context: &dyn Context,
    end: impl Fn(char) -> bool,
) -> MakeResult<String> {
    let mut word = String::new();
    loop {
        match cursor.peek() {
            None => break,
            Some(c) if end(c) => break,
            Some(c) => {
                if !substitution(cursor, context, &mut word)? {
                    word.push(c);
                    cursor.bump();
                }
            }
        }
    }
    Ok(word)
}

fn parse_parameters(cursor: &mut Cursor, context: &dyn Context) -> MakeResult<Parameters> {
    let mut parameters = Parameters::new();
    loop {
        cursor.skip_whitespace();
        match cursor.peek() {
            Some(')') => {
                cursor.bump();
                return Ok(parameters);
            }
            Some('-') => {
                cursor.bump();
                let option = parse_word(cursor, context, |c| {
                    c == ':' || c == ')' || c.is_whitespace()
                })?;
                let value = if cursor.eat(':') {
                    Some(parse_word(cursor, context, |c| c == ')' || c.is_whitespace())?)
                } else {
                    None
                };
                parameters.push(Parameter { option, value });
            }
            Some(c) => return Err(cursor.invalid_character(c).into()),
            None => {
                return Err(ExpressionError::MissingCloseParenthesis {
                    offset: cursor.position(),
                    remaining: cursor.remaining().to_string(),
                }
                .into());
            }
        }
    }
}
