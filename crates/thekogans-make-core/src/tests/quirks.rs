use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::context::{Context, ProjectContext};
use crate::errors::{ExpressionError, MakeResult};
use crate::function::{Function, FunctionRegistry, Parameters};
use crate::symbol_table::SymbolTable;
use crate::tests::context_with;
use crate::value::{Value, ValueType};
use pretty_assertions::assert_eq;

static CALLS: AtomicUsize = AtomicUsize::new(0);

/// Counts its calls and returns 1.
struct Counted;

impl Function for Counted {
    fn exec(&self, _: &dyn Context, _: &Parameters) -> MakeResult<Value> {
        CALLS.fetch_add(1, Ordering::SeqCst);
        Ok(Value::int(1))
    }
}

fn counted() -> Box<dyn Function> {
    Box::new(Counted)
}

fn counting_context() -> ProjectContext {
    let mut registry = FunctionRegistry::with_builtins();
    registry.register("counted", counted).unwrap();
    ProjectContext::new(Arc::new(registry), Arc::default())
}

#[test_log::test]
fn short_circuit_skips_calls() {
    // The only test touching CALLS, so the count is not shared with anything running in parallel.
    let c = counting_context();
    CALLS.store(0, Ordering::SeqCst);

    assert!(c.eval("1 == 1 || $(counted) == 1").unwrap());
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);

    assert!(!c.eval("1 == 2 && $(counted) == 1").unwrap());
    assert_eq!(CALLS.load(Ordering::SeqCst), 0);

    assert!(c.eval("1 == 2 || $(counted) == 1").unwrap());
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);

    assert!(c.eval("1 == 1 && $(counted) == 1").unwrap());
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}

#[test]
fn chained_operators_take_one_right_operand() {
    let c = context_with(Vec::<(&str, Value)>::new());

    // `a || b || c` reads as `a || b`; the rest is never looked at.
    assert!(!c.eval("1 == 2 || 1 == 3 || 1 == 1").unwrap());
    assert!(c.eval("1 == 1 && 2 == 2 && 3 == 4").unwrap());

    // Parentheses restore the intended grouping.
    assert!(c.eval("1 == 2 || (1 == 3 || 1 == 1)").unwrap());
}

#[test]
fn leftover_text_is_ignored() {
    let c = context_with(Vec::<(&str, Value)>::new());
    assert!(c.eval("x y ; ;").unwrap());
    assert!(!c.eval("$(false) && $(not a call").unwrap());
}

#[test]
fn decided_or_inside_parentheses_is_unbalanced() {
    let c = context_with(Vec::<(&str, Value)>::new());
    let err = c.eval("(1 == 1 || 1 == 2)").unwrap_err();
    assert_eq!(
        err.downcast_ref::<ExpressionError>(),
        Some(&ExpressionError::UnbalancedParenthesis)
    );
}

#[test]
fn coercion_follows_the_more_specific_type() {
    let c = context_with([
        ("ten", Value::int(10)),
        ("ten_f", Value::float(10.0)),
        ("yes", Value::bool(true)),
        ("v", Value::new(ValueType::Version, "2.0.0")),
    ]);

    // Int wins over text, so the literal is truncated to 9.
    assert!(c.eval("$(ten) > 9.5").unwrap());
    assert!(!c.eval("10 == 10.0").unwrap());
    assert!(c.eval("$(ten_f) == 10.0").unwrap());

    // Non-numeric text reads as 0.
    assert!(c.eval("$(ten) > abc").unwrap());
    assert!(c.eval("$(v) > not.a.version").unwrap());

    // Bools order as false < true but compare for equality as text.
    assert!(c.eval("$(yes) > $(false)").unwrap());
    assert!(!c.eval("$(yes) == TRUE").unwrap());
}

#[test_log::test]
fn mismatched_append_is_dropped() {
    let mut table = SymbolTable::new();
    table.append("flags", "-O2");
    table.append("flags", Value::int(3));
    table.append("flags", "-g");
    assert_eq!(
        table.get("flags"),
        Some(&Value::from_components(ValueType::String, ["-O2", "-g"]))
    );
}

#[test]
fn unknown_function_with_arguments_is_empty() {
    let c = context_with([("target", "app")]);
    assert!(c.eval("$(target -flag) == ''").unwrap());
    assert!(!c.eval("$(target -flag)").unwrap());
    assert!(c.eval("$(target) == app").unwrap());
}
