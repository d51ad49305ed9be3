use std::sync::Arc;

use maplit::btreemap;
use pretty_assertions::assert_eq;
use thekogans_make_core::{
    Context, ExpressionError, FunctionRegistry, ProjectAttributesBuilder, ProjectContext,
    SymbolTable, Value, ValueType,
};
use thekogans_make_util::Version;

fn environment() -> Arc<SymbolTable> {
    let symbols = btreemap! {
        "TOOLCHAIN_ROOT" => Value::string("/opt/thekogans/toolchain"),
        "DEVELOPMENT_ROOT" => Value::string("/home/dev"),
        "compiler_version" => Value::new(ValueType::Version, "13.2.0"),
    };
    Arc::new(symbols.into_iter().collect())
}

fn project() -> ProjectContext {
    let attributes = ProjectAttributesBuilder::default()
        .organization("thekogans")
        .project("stream")
        .project_type("library")
        .version(Version::new(0, 11, 4))
        .naming_convention("Hierarchical")
        .build_config("Release")
        .build_type("Shared")
        .build()
        .unwrap();
    ProjectContext::with_attributes(
        Arc::new(FunctionRegistry::with_builtins()),
        environment(),
        &attributes,
    )
}

#[test_log::test]
fn descriptor_conditions() {
    let c = project();
    assert!(c.eval("$(type) == Shared").unwrap());
    assert!(c.eval("$(version) >= 0.9.0 && $(version) < 1.0.0").unwrap());
    assert!(c.eval("$(compiler_version) > 9.4.0").unwrap());
    assert!(!c.eval("$(config) == Debug").unwrap());
    assert!(c.eval("!($(project_type) == program)").unwrap());
}

#[test]
fn descriptor_templates() {
    let c = project();
    assert_eq!(
        c.expand("$(DEVELOPMENT_ROOT)/$(organization)/$(project)/$(config)/$(type)")
            .unwrap(),
        "/home/dev/thekogans/stream/Release/Shared"
    );
    assert_eq!(
        c.expand("lib$(organization)_$(project)-$(version).so").unwrap(),
        "libthekogans_stream-0.11.4.so"
    );
}

#[test]
fn local_scope_shadows_and_clears() {
    let mut c = project();
    {
        let mut scope = c.local_scope();
        scope.local_mut().insert("config", "Debug");
        scope.local_mut().append("sources", "a.cpp");
        scope.local_mut().append("sources", "b.cpp");
        assert!(scope.eval("$(config) == Debug").unwrap());
        assert_eq!(scope.expand("$(sources)").unwrap(), "a.cpp b.cpp");
    }
    assert!(c.eval("$(config) == Release").unwrap());
    assert!(c.local_symbols().is_empty());
}

#[test]
fn environment_is_shared() {
    let registry = Arc::new(FunctionRegistry::with_builtins());
    let environment = environment();
    let debug = ProjectContext::new(registry.clone(), environment.clone());
    let release = ProjectContext::new(registry, environment);
    assert_eq!(
        debug.lookup_symbol("TOOLCHAIN_ROOT"),
        release.lookup_symbol("TOOLCHAIN_ROOT")
    );
}

#[test]
fn errors_name_the_expression() {
    let c = project();
    let err = c.eval("$(type) == 'Shared").unwrap_err();
    assert_eq!(err.to_string(), "failed to evaluate '$(type) == 'Shared'");
    assert!(matches!(
        err.downcast_ref::<ExpressionError>(),
        Some(ExpressionError::UnterminatedQuote { offset: 11, .. })
    ));

    let err = c.expand("$(project").unwrap_err();
    assert_eq!(err.to_string(), "failed to expand '$(project'");
    assert!(format!("{err:#}").contains("missing closing ')'"));
}
