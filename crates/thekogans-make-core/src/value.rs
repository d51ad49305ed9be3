//! The typed, possibly multi-component value shared by symbols, function results and literals.
//!
//! A [`Value`] keeps every component as text and lets its [`ValueType`] decide how that text is
//! read. Comparisons between two values do not require matching types: the more specific type of
//! the two decides how both sides are interpreted (see [`Value::relate`]).

use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use derive_more::Display;
use phf::phf_map;
use thekogans_make_util::split::{
    join_quoted, parse_float_lenient, parse_int_lenient, split_filter_empty,
};
use thekogans_make_util::{Guid, Version};
use tracing::debug;

use crate::errors::FunctionError;

const TRUE: &str = "true";
const FALSE: &str = "false";

#[derive(Debug, Display, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    #[default]
    #[display("unknown")]
    Unknown,
    #[display("bool")]
    Bool,
    #[display("int")]
    Int,
    #[display("float")]
    Float,
    #[display("string")]
    String,
    #[display("guid")]
    Guid,
    #[display("version")]
    Version,
}

static VALUE_TYPE_NAMES: phf::Map<&'static str, ValueType> = phf_map! {
    "bool" => ValueType::Bool,
    "int" => ValueType::Int,
    "float" => ValueType::Float,
    "string" => ValueType::String,
    "guid" => ValueType::Guid,
    "version" => ValueType::Version,
};

impl FromStr for ValueType {
    type Err = FunctionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VALUE_TYPE_NAMES
            .get(s)
            .copied()
            .ok_or_else(|| FunctionError::UnknownValueType(s.to_string()))
    }
}

/// The six relational operators of the expression grammar.
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq)]
pub enum Relation {
    #[display("==")]
    Eq,
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
}

impl Relation {
    fn is_equality(self) -> bool {
        matches!(self, Relation::Eq | Relation::Ne)
    }

    fn apply<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            Relation::Eq => lhs == rhs,
            Relation::Ne => lhs != rhs,
            Relation::Lt => lhs < rhs,
            Relation::Gt => lhs > rhs,
            Relation::Le => lhs <= rhs,
            Relation::Ge => lhs >= rhs,
        }
    }
}

/// Both operands of a comparison, read under the type that won coercion.
enum Coerced {
    Version(Version, Version),
    Float(f64, f64),
    Int(i64, i64),
    Bool(bool, bool),
    Text(String, String),
}

/// Structural equality (`PartialEq`) compares the type tag and the raw components. Use
/// [`Value::relate`] for the coercing comparison the expression language performs.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Value {
    value_type: ValueType,
    components: Vec<String>,
}

impl Value {
    /// A single component value holding `raw` verbatim.
    pub fn new<S: Into<String>>(value_type: ValueType, raw: S) -> Value {
        Value {
            value_type,
            components: vec![raw.into()],
        }
    }

    /// Split `text` on `separator` into components of type `value_type`. Empty pieces are
    /// dropped, so `"a b  c"` yields three components.
    pub fn parse(value_type: ValueType, text: &str, separator: char) -> Value {
        Value {
            value_type,
            components: split_filter_empty(text, separator)
                .map(String::from)
                .collect(),
        }
    }

    pub fn from_components<I, S>(value_type: ValueType, components: I) -> Value
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value {
            value_type,
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    pub fn bool(value: bool) -> Value {
        Value::new(ValueType::Bool, if value { TRUE } else { FALSE })
    }

    pub fn int(value: i64) -> Value {
        Value::new(ValueType::Int, value.to_string())
    }

    pub fn float(value: f64) -> Value {
        Value::new(ValueType::Float, value.to_string())
    }

    pub fn string<S: Into<String>>(value: S) -> Value {
        Value::new(ValueType::String, value)
    }

    pub fn guid(value: Guid) -> Value {
        Value::new(ValueType::Guid, value.to_string())
    }

    pub fn version(value: Version) -> Value {
        Value::new(ValueType::Version, value.to_string())
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn is_unknown(&self) -> bool {
        self.value_type == ValueType::Unknown
    }

    /// The component at `index` as a single component value of the same type, or an Unknown
    /// value when `index` is out of range.
    pub fn component(&self, index: usize) -> Value {
        match self.components.get(index) {
            Some(component) => Value::new(self.value_type, component.clone()),
            None => Value::default(),
        }
    }

    /// Join the components with `separator`. `quote_char` wraps the result only when `quote` is
    /// set and there are at least two components.
    pub fn to_string_with(&self, separator: char, quote: bool, quote_char: char) -> String {
        join_quoted(&self.components, separator, quote, quote_char)
    }

    /// Truthiness as used when a lone value stands in for a condition.
    pub fn is_true(&self) -> bool {
        let text = self.to_string();
        match self.value_type {
            ValueType::Unknown => false,
            ValueType::Bool => text == TRUE,
            ValueType::Int => parse_int_lenient(&text) != 0,
            ValueType::Float => parse_float_lenient(&text) != 0.0,
            ValueType::String | ValueType::Guid | ValueType::Version => !text.is_empty(),
        }
    }

    /// Append `other`'s components. An Unknown value adopts `other`'s type. Appending a value of
    /// a different known type leaves `self` untouched.
    pub fn append(&mut self, other: Value) {
        if self.value_type == ValueType::Unknown {
            self.value_type = other.value_type;
        } else if self.value_type != other.value_type {
            debug!(
                lhs = %self.value_type,
                rhs = %other.value_type,
                "dropping append of mismatched value type"
            );
            return;
        }
        self.components.extend(other.components);
    }

    /// Compare two values, possibly of different types.
    ///
    /// If either side is a Version, both are read as versions; otherwise Float, then Int. For the
    /// ordering relations a Bool on either side compares as `false < true`. Anything else falls
    /// back to comparing the joined text. Numeric text that does not parse reads as 0.
    pub fn relate(&self, relation: Relation, other: &Value) -> bool {
        match self.coerce(other, relation.is_equality()) {
            Coerced::Version(lhs, rhs) => relation.apply(lhs, rhs),
            Coerced::Float(lhs, rhs) => relation.apply(lhs, rhs),
            Coerced::Int(lhs, rhs) => relation.apply(lhs, rhs),
            Coerced::Bool(lhs, rhs) => relation.apply(lhs, rhs),
            Coerced::Text(lhs, rhs) => relation.apply(lhs, rhs),
        }
    }

    fn coerce(&self, other: &Value, equality: bool) -> Coerced {
        let either = |value_type| self.value_type == value_type || other.value_type == value_type;
        let (lhs, rhs) = (self.to_string(), other.to_string());

        if either(ValueType::Version) {
            Coerced::Version(Version::parse_lenient(&lhs), Version::parse_lenient(&rhs))
        } else if either(ValueType::Float) {
            Coerced::Float(parse_float_lenient(&lhs), parse_float_lenient(&rhs))
        } else if either(ValueType::Int) {
            Coerced::Int(parse_int_lenient(&lhs), parse_int_lenient(&rhs))
        } else if !equality && either(ValueType::Bool) {
            Coerced::Bool(lhs == TRUE, rhs == TRUE)
        } else {
            Coerced::Text(lhs, rhs)
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(' ', false, '"'))
    }
}

impl AddAssign for Value {
    fn add_assign(&mut self, rhs: Value) {
        self.append(rhs);
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string(value)
    }
}

impl From<Guid> for Value {
    fn from(value: Guid) -> Self {
        Value::guid(value)
    }
}

impl From<Version> for Value {
    fn from(value: Version) -> Self {
        Value::version(value)
    }
}
