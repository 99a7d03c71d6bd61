use crate::DeferredQueryError;
use crate::SplitDependency;
use crate::SplitId;
use crate::deferred_queries::DeferredQueriesTransform;
use crate::transform_deferred_queries;
use gqlc_ir::CompilerContext;
use gqlc_ir::ContextError;
use gqlc_ir::DerefByName;
use gqlc_ir::DerefByNameError;
use gqlc_ir::IrTransform;
use gqlc_ir::DocumentBuilder;
use gqlc_ir::ir::Directive;
use gqlc_ir::ir::Fragment;
use gqlc_ir::ir::FragmentSpread;
use gqlc_ir::ir::Selection;
use gqlc_ir::schema::Schema;
use gqlc_ir::schema::SchemaBuilder;

fn setup_schema() -> Schema {
    SchemaBuilder::from_str(
        r#"
        interface Node {
            id: ID!
        }

        type Query {
            node(id: ID!): Node
            viewer: User
        }

        type User implements Node {
            id: ID!
            name: String!
            bio: String
            profile: Profile
            settings: Settings
        }

        type Profile implements Node {
            id: ID!
            avatarUrl: String
        }

        type Settings {
            theme: String
        }
        "#,
    )
    .unwrap()
    .build()
    .unwrap()
}

fn setup_context(schema: &Schema, document: &str) -> CompilerContext {
    let mut builder = DocumentBuilder::new(schema);
    builder.add_from_str(document).unwrap();
    builder.build().unwrap()
}

#[test]
fn no_defer_is_identity() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                name
                ...ProfileFragment
            }
        }

        fragment ProfileFragment on User {
            bio
        }
        "#,
    );

    let result = transform_deferred_queries(&context).unwrap();
    assert_eq!(result.context, context);
    assert!(result.splits.is_empty());
}

#[test]
fn single_defer_splits_query() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                name
                ...ProfileFragment @defer
            }
        }

        fragment ProfileFragment on User {
            bio
        }
        "#,
    );

    let result = transform_deferred_queries(&context).unwrap();

    let expected = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                name
            }
        }

        query UserQueryDeferred1($id: ID!) {
            node(id: $id) {
                ... on User {
                    bio
                }
            }
        }
        "#,
    );
    assert_eq!(result.context.roots(), expected.roots());

    // Fragment definitions pass through untouched.
    assert_eq!(result.context.fragments(), context.fragments());

    assert_eq!(
        result.splits,
        vec![SplitDependency {
            id: SplitId(1),
            parent_id: SplitId(0),
            query_name: "UserQueryDeferred1".to_string(),
        }],
    );
}

#[test]
fn generated_root_declares_required_id_variable() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                ...ProfileFragment @defer
            }
        }

        fragment ProfileFragment on User {
            bio
        }
        "#,
    );

    let result = transform_deferred_queries(&context).unwrap();
    let deferred = &result.context.roots()["UserQueryDeferred1"];

    assert_eq!(deferred.variable_definitions.len(), 1);
    let variable = &deferred.variable_definitions[0];
    assert_eq!(variable.name, "id");
    assert!(variable.is_required());

    assert_eq!(deferred.selections.len(), 1);
    let Selection::LinkedField(node_field) = &deferred.selections[0] else {
        panic!("expected a linked `node` field, got {:?}", deferred.selections[0]);
    };
    assert_eq!(node_field.name, "node");
    assert_eq!(node_field.field_type.name(), "Node");
    assert_eq!(node_field.arguments.len(), 1);
    assert_eq!(node_field.arguments[0].name, "id");
}

#[test]
fn nested_defer_chains_off_enclosing_split() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                name
                ...ProfileFragment @defer
            }
        }

        fragment ProfileFragment on User {
            bio
            profile {
                ...AvatarFragment @defer
            }
        }

        fragment AvatarFragment on Profile {
            avatarUrl
        }
        "#,
    );

    let result = transform_deferred_queries(&context).unwrap();

    // Both splits surface as roots, and the inner one depends on the outer
    // split's identifier rather than on the original root's.
    assert_eq!(
        result.splits,
        vec![
            SplitDependency {
                id: SplitId(1),
                parent_id: SplitId(0),
                query_name: "UserQueryDeferred1".to_string(),
            },
            SplitDependency {
                id: SplitId(2),
                parent_id: SplitId(1),
                query_name: "UserQueryDeferred2".to_string(),
            },
        ],
    );
    assert_eq!(result.context.roots().len(), 3);

    let expected_inner = setup_context(
        &schema,
        r#"
        query UserQueryDeferred2($id: ID!) {
            node(id: $id) {
                ... on Profile {
                    avatarUrl
                }
            }
        }
        "#,
    );
    assert_eq!(
        result.context.roots()["UserQueryDeferred2"],
        expected_inner.roots()["UserQueryDeferred2"],
    );

    // The outer split's body had its own deferred spread pruned.
    let outer = &result.context.roots()["UserQueryDeferred1"];
    let Selection::LinkedField(node_field) = &outer.selections[0] else {
        panic!("expected a linked `node` field");
    };
    let Selection::InlineFragment(inline) = &node_field.selections[0] else {
        panic!("expected an inline fragment under `node`");
    };
    assert_eq!(inline.type_condition.name(), "User");
    let Selection::LinkedField(profile_field) = &inline.selections[1] else {
        panic!("expected the `profile` field to survive");
    };
    assert_eq!(profile_field.name, "profile");
    assert!(profile_field.selections.is_empty());
}

#[test]
fn identifiers_are_unique_and_increasing_across_roots() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query QueryA {
            viewer {
                ...ProfileFragment @defer
            }
        }

        query QueryB {
            viewer {
                ...ProfileFragment @defer
            }
        }

        fragment ProfileFragment on User {
            bio
        }
        "#,
    );

    let result = transform_deferred_queries(&context).unwrap();

    // Roots claim an identifier when first visited, so the two splits are
    // 1 (under root 0) and 3 (under root 2).
    assert_eq!(
        result.splits,
        vec![
            SplitDependency {
                id: SplitId(1),
                parent_id: SplitId(0),
                query_name: "QueryADeferred1".to_string(),
            },
            SplitDependency {
                id: SplitId(3),
                parent_id: SplitId(2),
                query_name: "QueryBDeferred3".to_string(),
            },
        ],
    );
    let ids: Vec<SplitId> = result.splits.iter().map(|split| split.id).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    // Splits from every root are merged, not just the last root's.
    assert!(result.context.roots().contains_key("QueryADeferred1"));
    assert!(result.context.roots().contains_key("QueryBDeferred3"));
}

#[test]
fn defer_on_non_node_type_is_a_compile_error() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                settings {
                    ...SettingsFragment @defer
                }
            }
        }

        fragment SettingsFragment on Settings {
            theme
        }
        "#,
    );

    let result = transform_deferred_queries(&context);
    assert_eq!(
        result,
        Err(DeferredQueryError::NotRefetchable {
            fragment: "SettingsFragment".to_string(),
            type_condition: "Settings".to_string(),
        }),
    );
}

#[test]
fn defer_hidden_inside_plain_fragment_is_a_compile_error() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                ...PlainFragment
            }
        }

        fragment PlainFragment on User {
            name
            ...DeferredFragment @defer
        }

        fragment DeferredFragment on User {
            bio
        }
        "#,
    );

    let result = transform_deferred_queries(&context);
    assert_eq!(
        result,
        Err(DeferredQueryError::DeferInsidePlainFragment {
            enclosing: "PlainFragment".to_string(),
            fragment: "DeferredFragment".to_string(),
        }),
    );
}

#[test]
fn defer_hidden_behind_nested_plain_spreads_is_found() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                ...OuterFragment
            }
        }

        fragment OuterFragment on User {
            name
            ...InnerFragment
        }

        fragment InnerFragment on User {
            profile {
                ...AvatarFragment @defer
            }
        }

        fragment AvatarFragment on Profile {
            avatarUrl
        }
        "#,
    );

    let result = transform_deferred_queries(&context);
    assert_eq!(
        result,
        Err(DeferredQueryError::DeferInsidePlainFragment {
            enclosing: "InnerFragment".to_string(),
            fragment: "AvatarFragment".to_string(),
        }),
    );
}

#[test]
fn defer_on_missing_fragment_is_a_compile_error() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                ...MissingFragment @defer
            }
        }
        "#,
    );

    let result = transform_deferred_queries(&context);
    assert_eq!(
        result,
        Err(DeferredQueryError::UnknownFragment(
            DerefByNameError::DanglingReference("MissingFragment".to_string()),
        )),
    );
}

#[test]
fn defer_outside_any_operation_is_rejected() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        fragment ProfileFragment on User {
            bio
        }
        "#,
    );

    let mut transform = DeferredQueriesTransform::new(&context).unwrap();
    let spread = FragmentSpread {
        directives: vec![Directive {
            arguments: vec![],
            name: "defer".to_string(),
        }],
        fragment: Fragment::named_ref("ProfileFragment"),
    };

    let result = transform.transform_fragment_spread(&spread, &None);
    assert_eq!(
        result,
        Err(DeferredQueryError::DeferOutsideQuery {
            fragment: "ProfileFragment".to_string(),
        }),
    );
}

#[test]
fn other_directives_pass_through() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                name
                ...ProfileFragment @include(if: true)
            }
        }

        fragment ProfileFragment on User {
            bio
        }
        "#,
    );

    let result = transform_deferred_queries(&context).unwrap();
    assert_eq!(result.context, context);
    assert!(result.splits.is_empty());
}

#[test]
fn generated_name_collision_is_a_compile_error() {
    let schema = setup_schema();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                ...ProfileFragment @defer
            }
        }

        query UserQueryDeferred1 {
            viewer {
                name
            }
        }

        fragment ProfileFragment on User {
            bio
        }
        "#,
    );

    let result = transform_deferred_queries(&context);
    assert_eq!(
        result,
        Err(DeferredQueryError::MergeCollision(
            ContextError::DuplicateRootName {
                name: "UserQueryDeferred1".to_string(),
            },
        )),
    );
}

#[test]
fn schema_without_node_interface_cannot_defer() {
    let schema = SchemaBuilder::from_str(
        r#"
        type Query {
            viewer: User
        }

        type User {
            id: ID!
            name: String!
        }
        "#,
    )
    .unwrap()
    .build()
    .unwrap();
    let context = setup_context(
        &schema,
        r#"
        query UserQuery {
            viewer {
                name
            }
        }
        "#,
    );

    let result = transform_deferred_queries(&context);
    assert_eq!(
        result,
        Err(DeferredQueryError::SchemaNotRefetchCapable {
            expected: "an interface type",
            type_name: "Node",
        }),
    );
}
