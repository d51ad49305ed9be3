use thiserror::Error;

/// Malformed expression or function-call text. Every variant is fatal for the expression being
/// evaluated; `offset` is a byte offset into the text handed to the scanner and `remaining` is the
/// unparsed text from that point on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("expecting '{expected}{expected}' at offset {offset}, remaining: '{remaining}'")]
    IncompleteOperator {
        expected: char,
        offset: usize,
        remaining: String,
    },

    #[error("invalid character '{character}' at offset {offset}, remaining: '{remaining}'")]
    InvalidCharacter {
        character: char,
        offset: usize,
        remaining: String,
    },

    #[error("unterminated quoted string starting at offset {offset}: '{remaining}'")]
    UnterminatedQuote { offset: usize, remaining: String },

    #[error("invalid escape sequence '\\{escaped}' at offset {offset}")]
    InvalidEscape { escaped: char, offset: usize },

    #[error("dangling '\\' at end of input (offset {offset})")]
    DanglingEscape { offset: usize },

    #[error("expecting '(' after '$' at offset {offset}, remaining: '{remaining}'")]
    MissingOpenParenthesis { offset: usize, remaining: String },

    #[error("missing closing ')' at offset {offset}, remaining: '{remaining}'")]
    MissingCloseParenthesis { offset: usize, remaining: String },

    #[error("missing function or symbol name at offset {offset}, remaining: '{remaining}'")]
    MissingIdentifier { offset: usize, remaining: String },

    #[error("missing closing ']' at offset {offset}, remaining: '{remaining}'")]
    MissingCloseBracket { offset: usize, remaining: String },

    #[error("invalid index '{index}' at offset {offset}")]
    InvalidIndex { index: String, offset: usize },

    #[error("expecting value")]
    ExpectingValue,

    #[error("expecting ')' to close parenthesized expression")]
    UnbalancedParenthesis,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("function '{name}' is already registered")]
    DuplicateFunction { name: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("{function}: missing required parameter -{option}")]
    MissingParameter {
        function: &'static str,
        option: &'static str,
    },

    #[error("unknown value type '{0}'")]
    UnknownValueType(String),
}

pub type MakeResult<T> = anyhow::Result<T>;
