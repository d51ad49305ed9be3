use std::sync::Arc;

use crate::context::ProjectContext;
use crate::function::FunctionRegistry;
use crate::value::Value;

mod quirks;

/// A context with every builtin registered and `symbols` defined as project constants.
pub(crate) fn context_with<I, K, V>(symbols: I) -> ProjectContext
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let mut context =
        ProjectContext::new(Arc::new(FunctionRegistry::with_builtins()), Arc::default());
    context.global_mut().extend(symbols);
    context
}
