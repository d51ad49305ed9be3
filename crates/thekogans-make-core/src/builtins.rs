//! Functions every registry built with [`FunctionRegistry::with_builtins`] provides.
//!
//! | name | parameters | result |
//! |------|------------|--------|
//! | `true`, `false` | | bool |
//! | `env` | `-name:N [-default:D]` | string from the process environment |
//! | `defined` | `-name:N` | bool, whether `N` resolves to a known value |
//! | `value` | `-type:T -value:V [-separator:C]` | `V` split on `C` as type `T` |
//! | `to_upper`, `to_lower` | `-value:V` | string |
//! | `size` | `-name:N` | int, component count of symbol `N` |
//! | `join` | `-name:N [-separator:C] [-quote]` | string |
//! | `exists` | `-path:P` | bool, whether the path exists |
//! | `host_os`, `host_arch` | | string |
//!
//! [`FunctionRegistry::with_builtins`]: crate::function::FunctionRegistry::with_builtins

use std::path::Path;

use crate::context::Context;
use crate::errors::MakeResult;
use crate::function::{Function, FunctionFactory, Parameters};
use crate::value::{Value, ValueType};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Builtin {
    True,
    False,
    Env,
    Defined,
    Value,
    ToUpper,
    ToLower,
    Size,
    Join,
    Exists,
    HostOs,
    HostArch,
}

macro_rules! factory {
    ($variant:ident) => {
        || -> Box<dyn Function> { Box::new(Builtin::$variant) }
    };
}

impl Builtin {
    pub const ALL: [Builtin; 12] = [
        Builtin::True,
        Builtin::False,
        Builtin::Env,
        Builtin::Defined,
        Builtin::Value,
        Builtin::ToUpper,
        Builtin::ToLower,
        Builtin::Size,
        Builtin::Join,
        Builtin::Exists,
        Builtin::HostOs,
        Builtin::HostArch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::True => "true",
            Builtin::False => "false",
            Builtin::Env => "env",
            Builtin::Defined => "defined",
            Builtin::Value => "value",
            Builtin::ToUpper => "to_upper",
            Builtin::ToLower => "to_lower",
            Builtin::Size => "size",
            Builtin::Join => "join",
            Builtin::Exists => "exists",
            Builtin::HostOs => "host_os",
            Builtin::HostArch => "host_arch",
        }
    }

    pub(crate) fn factory(self) -> FunctionFactory {
        match self {
            Builtin::True => factory!(True),
            Builtin::False => factory!(False),
            Builtin::Env => factory!(Env),
            Builtin::Defined => factory!(Defined),
            Builtin::Value => factory!(Value),
            Builtin::ToUpper => factory!(ToUpper),
            Builtin::ToLower => factory!(ToLower),
            Builtin::Size => factory!(Size),
            Builtin::Join => factory!(Join),
            Builtin::Exists => factory!(Exists),
            Builtin::HostOs => factory!(HostOs),
            Builtin::HostArch => factory!(HostArch),
        }
    }
}

impl Function for Builtin {
    fn exec(&self, context: &dyn Context, parameters: &Parameters) -> MakeResult<Value> {
        let name = self.name();
        Ok(match self {
            Builtin::True => Value::bool(true),
            Builtin::False => Value::bool(false),
            Builtin::Env => {
                let variable = parameters.require(name, "name")?;
                match (std::env::var(variable), parameters.value("default")) {
                    (Ok(value), _) => Value::string(value),
                    (Err(_), Some(default)) => Value::string(default),
                    (Err(_), None) => Value::default(),
                }
            }
            Builtin::Defined => {
                let symbol = parameters.require(name, "name")?;
                Value::bool(!context.lookup_symbol(symbol).is_unknown())
            }
            Builtin::Value => {
                let value_type: ValueType = parameters.require(name, "type")?.parse()?;
                let text = parameters.require(name, "value")?;
                let separator = parameters
                    .value("separator")
                    .and_then(|s| s.chars().next())
                    .unwrap_or(' ');
                Value::parse(value_type, text, separator)
            }
            Builtin::ToUpper => Value::string(parameters.require(name, "value")?.to_uppercase()),
            Builtin::ToLower => Value::string(parameters.require(name, "value")?.to_lowercase()),
            Builtin::Size => {
                let symbol = parameters.require(name, "name")?;
                let count = context.lookup_symbol(symbol).len();
                Value::int(i64::try_from(count).unwrap_or(i64::MAX))
            }
            Builtin::Join => {
                let symbol = parameters.require(name, "name")?;
                let separator = parameters
                    .value("separator")
                    .and_then(|s| s.chars().next())
                    .unwrap_or(' ');
                let value = context.lookup_symbol(symbol);
                Value::string(value.to_string_with(separator, parameters.has("quote"), '"'))
            }
            Builtin::Exists => Value::bool(Path::new(parameters.require(name, "path")?).exists()),
            Builtin::HostOs => Value::string(std::env::consts::OS),
            Builtin::HostArch => Value::string(std::env::consts::ARCH),
        })
    }
}
