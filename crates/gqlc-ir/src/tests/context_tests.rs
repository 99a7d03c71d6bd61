use crate::ContextError;
use crate::DerefByNameError;
use crate::tests::setup_context;
use crate::tests::setup_schema;

#[test]
fn fragment_lookup_by_name() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        "fragment UserFields on User { id name }",
    );

    let fragment = context.fragment("UserFields").unwrap();
    assert_eq!(fragment.name, "UserFields");

    assert_eq!(
        context.fragment("Dangling").unwrap_err(),
        DerefByNameError::DanglingReference("Dangling".to_string()),
    );
}

#[test]
fn add_all_merges_roots() {
    let schema = setup_schema();
    let mut context = setup_context(&schema, "query A { viewer { name } }");
    let extra = setup_context(&schema, "query B { viewer { bio } }");

    context
        .add_all(extra.roots().values().cloned().collect())
        .unwrap();
    assert_eq!(context.roots().len(), 2);
    assert!(context.roots().contains_key("A"));
    assert!(context.roots().contains_key("B"));
}

#[test]
fn add_all_rejects_duplicate_root_names() {
    let schema = setup_schema();
    let mut context = setup_context(&schema, "query A { viewer { name } }");
    let extra = setup_context(&schema, "query A { viewer { bio } }");

    let result = context.add_all(extra.roots().values().cloned().collect());
    assert_eq!(
        result.unwrap_err(),
        ContextError::DuplicateRootName { name: "A".to_string() },
    );
}

#[test]
fn duplicate_fragment_names_are_rejected() {
    let schema = setup_schema();
    let mut builder = crate::DocumentBuilder::new(&schema);
    builder
        .add_from_str("fragment UserFields on User { id }")
        .unwrap();
    builder
        .add_from_str("fragment UserFields on User { name }")
        .unwrap();

    let result = builder.build();
    assert_eq!(
        result.unwrap_err(),
        crate::DocumentBuildError::ContextError(
            ContextError::DuplicateFragmentName { name: "UserFields".to_string() },
        ),
    );
}
