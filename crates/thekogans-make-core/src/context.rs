//! Symbol resolution and the evaluation context handed to functions.

use std::sync::Arc;

use derive_builder::Builder;
use scopeguard::{ScopeGuard, guard};
use thekogans_make_util::Version;
use tracing::debug;

use crate::errors::MakeResult;
use crate::expand::expand;
use crate::function::FunctionRegistry;
use crate::parser::eval;
use crate::symbol_table::SymbolTable;
use crate::value::Value;

/// What the interpreter needs from the project being loaded.
pub trait Context {
    fn functions(&self) -> &FunctionRegistry;

    /// Symbols scoped to the descriptor element currently being parsed.
    fn local_symbols(&self) -> &SymbolTable;

    /// Constants and built-in project attributes of the project being loaded.
    fn global_symbols(&self) -> &SymbolTable;

    /// Descriptor-independent values shared by every project.
    fn environment_symbols(&self) -> &SymbolTable;

    /// Resolve `name` through the local, global and environment tables, then the OS
    /// environment. An unresolved name is an Unknown value, not an error.
    fn lookup_symbol(&self, name: &str) -> Value {
        let tables = [
            self.local_symbols(),
            self.global_symbols(),
            self.environment_symbols(),
        ];
        if let Some(value) = tables.into_iter().find_map(|table| table.get(name)) {
            return value.clone();
        }

        match std::env::var(name) {
            Ok(value) => {
                debug!(name, "symbol resolved from the process environment");
                Value::string(value)
            }
            Err(_) => Value::default(),
        }
    }
}

/// Built-in attributes of a project, published to its global symbol table.
#[derive(Builder, Debug, Default, Clone, PartialEq)]
#[builder(setter(into), default)]
pub struct ProjectAttributes {
    pub organization: String,
    pub project: String,
    pub project_type: String,
    pub version: Version,
    pub naming_convention: String,
    pub build_config: String,
    pub build_type: String,
}

impl ProjectAttributes {
    pub const ORGANIZATION: &'static str = "organization";
    pub const PROJECT: &'static str = "project";
    pub const PROJECT_TYPE: &'static str = "project_type";
    pub const VERSION: &'static str = "version";
    pub const NAMING_CONVENTION: &'static str = "naming_convention";
    pub const BUILD_CONFIG: &'static str = "config";
    pub const BUILD_TYPE: &'static str = "type";

    fn publish(&self, table: &mut SymbolTable) {
        table.insert(Self::ORGANIZATION, self.organization.as_str());
        table.insert(Self::PROJECT, self.project.as_str());
        table.insert(Self::PROJECT_TYPE, self.project_type.as_str());
        table.insert(Self::VERSION, self.version);
        table.insert(Self::NAMING_CONVENTION, self.naming_convention.as_str());
        table.insert(Self::BUILD_CONFIG, self.build_config.as_str());
        table.insert(Self::BUILD_TYPE, self.build_type.as_str());
    }
}

/// The context for one project configuration. The function registry and the environment table
/// are shared with every other context built by the same composition root.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    functions: Arc<FunctionRegistry>,
    environment: Arc<SymbolTable>,
    global: SymbolTable,
    local: SymbolTable,
}

impl ProjectContext {
    pub fn new(functions: Arc<FunctionRegistry>, environment: Arc<SymbolTable>) -> Self {
        ProjectContext {
            functions,
            environment,
            global: SymbolTable::new(),
            local: SymbolTable::new(),
        }
    }

    pub fn with_attributes(
        functions: Arc<FunctionRegistry>,
        environment: Arc<SymbolTable>,
        attributes: &ProjectAttributes,
    ) -> Self {
        let mut context = Self::new(functions, environment);
        attributes.publish(&mut context.global);
        context
    }

    pub fn define_constant<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) {
        self.global.insert(name, value);
    }

    pub fn global_mut(&mut self) -> &mut SymbolTable {
        &mut self.global
    }

    pub fn local_mut(&mut self) -> &mut SymbolTable {
        &mut self.local
    }

    /// Enter a nested parse scope. The local table is cleared when the returned guard is dropped,
    /// whether the scope's work finished or bailed out with an error.
    pub fn local_scope(&mut self) -> ScopeGuard<&mut Self, fn(&mut Self)> {
        let clear: fn(&mut Self) = |context| context.local.clear();
        guard(self, clear)
    }

    pub fn eval(&self, expression: &str) -> MakeResult<bool> {
        eval(self, expression)
    }

    pub fn expand(&self, format: &str) -> MakeResult<String> {
        expand(self, format)
    }
}

impl Context for ProjectContext {
    fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    fn local_symbols(&self) -> &SymbolTable {
        &self.local
    }

    fn global_symbols(&self) -> &SymbolTable {
        &self.global
    }

    fn environment_symbols(&self) -> &SymbolTable {
        &self.environment
    }
}
