//! Named functions callable from descriptor text as `$(name -option:value ...)`.
//!
//! Functions live in a [`FunctionRegistry`] built by the application at startup. A registered
//! function is opaque to the interpreter: it receives the evaluation context and the raw
//! parameters and may do anything, including file system access or spawning tools. Descriptor
//! authors are trusted; nothing here sandboxes a function.

use std::fmt;

use fxhash::FxHashMap;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::builtins::Builtin;
use crate::context::Context;
use crate::errors::{FunctionError, MakeResult, RegistryError};
use crate::value::Value;

pub trait Function {
    fn exec(&self, context: &dyn Context, parameters: &Parameters) -> MakeResult<Value>;
}

/// Produces a fresh function instance for every call.
pub type FunctionFactory = fn() -> Box<dyn Function>;

#[derive(Debug, Default, Clone)]
pub struct FunctionRegistry {
    factories: FxHashMap<String, FunctionFactory>,
}

impl FunctionRegistry {
    /// An empty registry. Names that are not registered resolve as symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every [`Builtin`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for builtin in Builtin::ALL {
            registry
                .factories
                .insert(builtin.name().to_string(), builtin.factory());
        }
        registry
    }

    pub fn register<S: Into<String>>(
        &mut self,
        name: S,
        factory: FunctionFactory,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(RegistryError::DuplicateFunction { name });
        }
        self.factories.insert(name, factory);
        Ok(())
    }

    /// Remove `name`, after which `$(name)` resolves as a symbol again.
    pub fn unregister(&mut self, name: &str) -> Option<FunctionFactory> {
        self.factories.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Instantiate the function registered as `name`.
    pub fn create(&self, name: &str) -> Option<Box<dyn Function>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories
            .keys()
            .map(String::as_str)
            .sorted_unstable()
            .collect()
    }
}

/// A function or symbol name, optionally indexing one component of a multi-valued symbol as in
/// `$(sources[2])`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub index: Option<usize>,
}

impl Identifier {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Identifier {
            name: name.into(),
            index: None,
        }
    }

    pub fn indexed<S: Into<String>>(name: S, index: usize) -> Self {
        Identifier {
            name: name.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => f.write_str(&self.name),
        }
    }
}

/// One `-option` or `-option:value` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub option: String,
    pub value: Option<String>,
}

impl Parameter {
    pub fn new<S: Into<String>>(option: S, value: Option<S>) -> Self {
        Parameter {
            option: option.into(),
            value: value.map(Into::into),
        }
    }
}

/// Parameters in call-site order. Some functions care about that order, so lookups return the
/// first match and [`Parameters::iter`] yields them as written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, parameter: Parameter) {
        self.0.push(parameter);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    pub fn get(&self, option: &str) -> Option<&Parameter> {
        self.0.iter().find(|p| p.option == option)
    }

    /// True if `-option` was given, with or without a value.
    pub fn has(&self, option: &str) -> bool {
        self.get(option).is_some()
    }

    pub fn value(&self, option: &str) -> Option<&str> {
        self.get(option).and_then(|p| p.value.as_deref())
    }

    pub fn require(&self, function: &'static str, option: &'static str) -> MakeResult<&str> {
        self.value(option)
            .ok_or_else(|| FunctionError::MissingParameter { function, option }.into())
    }
}

impl FromIterator<Parameter> for Parameters {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Parameters(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Run a parsed call.
///
/// 1. A registered function named `identifier.name` gets the call.
/// 2. Otherwise, with no parameters, the name is a symbol lookup. An index selects one
///    component, and an out of range index gives an Unknown value.
/// 3. Otherwise (an unknown name with parameters) the result is an Unknown value.
pub fn exec(
    context: &dyn Context,
    identifier: &Identifier,
    parameters: &Parameters,
) -> MakeResult<Value> {
    if let Some(function) = context.functions().create(&identifier.name) {
        trace!(name = %identifier.name, parameters = parameters.len(), "calling function");
        return function.exec(context, parameters);
    }

    if parameters.is_empty() {
        let value = context.lookup_symbol(&identifier.name);
        return Ok(match identifier.index {
            Some(index) => value.component(index),
            None => value,
        });
    }

    debug!(
        name = %identifier.name,
        parameters = parameters.len(),
        "unknown function called with parameters; resolving to an empty value"
    );
    Ok(Value::default())
}
