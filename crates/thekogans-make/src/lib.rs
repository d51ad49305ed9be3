//! Command line plumbing for `thekogans_make`: symbol definitions given as arguments and the
//! context they are loaded into.

use std::str::FromStr;
use std::sync::Arc;

use thekogans_make_core::{
    FunctionRegistry, ProjectAttributes, ProjectContext, SymbolTable, Value, ValueType,
};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("expected NAME[:TYPE]=VALUE, got '{0}'")]
    MissingEquals(String),

    #[error("empty symbol name in '{0}'")]
    EmptyName(String),

    #[error("unknown value type '{value_type}' in '{definition}'")]
    UnknownType {
        value_type: String,
        definition: String,
    },
}

/// A symbol given on the command line as `NAME[:TYPE]=VALUE`. The type defaults to `string`, and
/// the value is split on spaces into components.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub value: Value,
}

impl FromStr for Definition {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lhs, text) = s
            .split_once('=')
            .ok_or_else(|| DefinitionError::MissingEquals(s.to_string()))?;

        let (name, value_type) = match lhs.split_once(':') {
            Some((name, value_type)) => {
                let value_type =
                    value_type
                        .parse::<ValueType>()
                        .map_err(|_| DefinitionError::UnknownType {
                            value_type: value_type.to_string(),
                            definition: s.to_string(),
                        })?;
                (name, value_type)
            }
            None => (lhs, ValueType::String),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(DefinitionError::EmptyName(s.to_string()));
        }

        Ok(Definition {
            name: name.to_string(),
            value: Value::parse(value_type, text, ' '),
        })
    }
}

/// Where the definitions of each kind end up.
#[derive(Debug, Default, Clone)]
pub struct Definitions {
    pub environment: Vec<Definition>,
    pub global: Vec<Definition>,
    pub local: Vec<Definition>,
}

fn symbols(definitions: &[Definition]) -> impl Iterator<Item = (String, Value)> + '_ {
    definitions
        .iter()
        .map(|d| (d.name.clone(), d.value.clone()))
}

/// Build the context for one project configuration from the command line.
pub fn build_context(attributes: &ProjectAttributes, definitions: &Definitions) -> ProjectContext {
    let functions = Arc::new(FunctionRegistry::with_builtins());
    debug!(functions = ?functions.names(), "registered functions");

    let environment: SymbolTable = symbols(&definitions.environment).collect();
    let mut context = ProjectContext::with_attributes(functions, Arc::new(environment), attributes);
    context.global_mut().extend(symbols(&definitions.global));
    context.local_mut().extend(symbols(&definitions.local));
    context
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use thekogans_make_core::{Context, ProjectAttributesBuilder};

    #[test]
    fn parse_definitions() {
        let d: Definition = "config=Debug".parse().unwrap();
        assert_eq!(d.name, "config");
        assert_eq!(d.value, Value::string("Debug"));

        let d: Definition = "jobs:int=8".parse().unwrap();
        assert_eq!(d.value, Value::int(8));

        let d: Definition = "defines=A=1 B=2".parse().unwrap();
        assert_eq!(d.value.components(), ["A=1", "B=2"]);

        let d: Definition = "empty=".parse().unwrap();
        assert!(d.value.is_empty());
    }

    #[test]
    fn definition_errors() {
        assert_eq!(
            "config".parse::<Definition>(),
            Err(DefinitionError::MissingEquals("config".into()))
        );
        assert_eq!(
            ":int=1".parse::<Definition>(),
            Err(DefinitionError::EmptyName(":int=1".into()))
        );
        assert!(matches!(
            "x:blob=1".parse::<Definition>(),
            Err(DefinitionError::UnknownType { value_type, .. }) if value_type == "blob"
        ));
    }

    #[test]
    fn definitions_land_in_their_tables() {
        let definitions = Definitions {
            environment: vec!["root=/env".parse().unwrap(), "config=env".parse().unwrap()],
            global: vec!["config=Release".parse().unwrap()],
            local: vec!["file=a.cpp".parse().unwrap()],
        };
        let attributes = ProjectAttributesBuilder::default()
            .project("tool")
            .build()
            .unwrap();
        let c = build_context(&attributes, &definitions);

        assert_eq!(c.lookup_symbol("root"), Value::string("/env"));
        assert_eq!(c.lookup_symbol("config"), Value::string("Release"));
        assert_eq!(c.lookup_symbol("file"), Value::string("a.cpp"));
        assert_eq!(c.lookup_symbol("project"), Value::string("tool"));
    }
}
