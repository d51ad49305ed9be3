use std::sync::Arc;

use proptest::prelude::*;
use thekogans_make_core::{FunctionRegistry, ProjectContext, Relation, Value, ValueType, eval};
use thekogans_make_util::Version;

fn context() -> ProjectContext {
    ProjectContext::new(Arc::new(FunctionRegistry::with_builtins()), Arc::default())
}

fn reflexive(value: &Value) -> bool {
    value.relate(Relation::Eq, value) && !value.relate(Relation::Ne, value)
}

proptest! {
    /// Arbitrary input either evaluates or fails with an error; it never panics.
    #[test]
    fn eval_does_not_panic(s in "\\PC*") {
        let _ = eval(&context(), &s);
    }

    #[test]
    fn ints_are_reflexive(n in any::<i64>()) {
        prop_assert!(reflexive(&Value::int(n)));
    }

    #[test]
    fn ints_order_numerically(a in any::<i64>(), b in any::<i64>()) {
        let (lhs, rhs) = (Value::int(a), Value::int(b));
        prop_assert_eq!(lhs.relate(Relation::Lt, &rhs), a < b);
        prop_assert_eq!(lhs.relate(Relation::Eq, &rhs), a == b);
        prop_assert_eq!(lhs.relate(Relation::Gt, &rhs), a > b);
    }

    #[test]
    fn floats_are_reflexive(x in any::<f64>()) {
        prop_assert!(reflexive(&Value::float(x)));
    }

    #[test]
    fn float_text_is_reflexive(text in "(?i)nan|inf|-inf|[0-9.e+-]{0,8}") {
        prop_assert!(reflexive(&Value::new(ValueType::Float, text)));
    }

    #[test]
    fn versions_are_reflexive(major in 0u32..1000, minor in 0u32..1000, patch in 0u32..1000) {
        prop_assert!(reflexive(&Value::version(Version::new(major, minor, patch))));
    }

    /// A version compared against its text form orders componentwise, never lexically.
    #[test]
    fn version_ordering_is_componentwise(
        a in (0u32..30, 0u32..30, 0u32..30),
        b in (0u32..30, 0u32..30, 0u32..30),
    ) {
        let lhs = Value::version(Version::new(a.0, a.1, a.2));
        let rhs = Value::string(format!("{}.{}.{}", b.0, b.1, b.2));
        prop_assert_eq!(lhs.relate(Relation::Lt, &rhs), a < b);
        prop_assert_eq!(lhs.relate(Relation::Eq, &rhs), a == b);
        prop_assert_eq!(lhs.relate(Relation::Ge, &rhs), a >= b);
    }

    #[test]
    fn single_component_round_trip(text in "[A-Za-z0-9_.:/-]{1,16}") {
        for value_type in [ValueType::String, ValueType::Int, ValueType::Version] {
            let value = Value::new(value_type, text.clone());
            let text = value.to_string_with(' ', false, '"');
            prop_assert_eq!(Value::parse(value_type, &text, ' '), value);
        }
    }
}
