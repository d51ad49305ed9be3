//!
//! ## Introduction
//! This crate evaluates the two kinds of text found in thekogans_make project descriptors:
//!
//! - **conditions**, the contents of `<if condition="...">`, which evaluate to a bool via [`eval`];
//! - **templates**, such as `$(build_root)/lib/$(project)`, which expand to a string via [`expand`].
//!
//! Both can contain embedded calls of the form `$(name -option:value ...)`.
//!
//! ## Terminology
//!
//! ### Values
//! Everything the interpreter handles is a [`Value`]: a [`ValueType`] tag plus an ordered list of
//! text components. `$(sources)` for a symbol defined as `a.cpp b.cpp` is a single value with two
//! components. A value with the `Unknown` type is what an unresolved symbol produces; it is never
//! an error to reference a symbol that doesn't exist.
//!
//! ### Calls
//! Consider:
//!
//! ```text
//! $(flags_$(config)[0])
//! $(join -name:defines -separator:; -quote)
//! ```
//!
//! A call names either a registered [`Function`] or a symbol. If the name is registered in the
//! context's [`FunctionRegistry`], the function runs with the parameters. Otherwise a call with no
//! parameters looks the name up as a symbol, and a call with parameters produces an Unknown value.
//! Names can themselves be built from nested calls, as in the first line above.
//!
//! ### Symbol resolution
//! A symbol is looked up in the local table (the descriptor element being parsed), then the global
//! table (project constants and attributes), then the environment table shared by all projects, and
//! finally the process environment. See [`Context::lookup_symbol`].
//!
//! ## Evaluation
//! Conditions are evaluated while they are scanned. Calls run as they are tokenized, so a call
//! whose result is not needed (the right side of `||` after a true left side, for example) never
//! runs. A condition can't be re-evaluated from a parsed form; evaluate the text again instead.

pub mod builtins;
mod call;
pub mod context;
mod cursor;
pub mod errors;
pub mod expand;
pub mod function;
pub mod parser;
pub mod symbol_table;
pub mod tokenizer;
pub mod value;

#[cfg(test)]
mod tests;

pub use context::{Context, ProjectAttributes, ProjectAttributesBuilder, ProjectContext};
pub use errors::{ExpressionError, FunctionError, MakeResult, RegistryError};
pub use expand::expand;
pub use function::{Function, FunctionFactory, FunctionRegistry, Parameter, Parameters};
pub use parser::eval;
pub use symbol_table::SymbolTable;
pub use value::{Relation, Value, ValueType};
