mod context_tests;

use crate::CompilerContext;
use crate::DocumentBuilder;
use crate::schema::Schema;
use crate::schema::SchemaBuilder;

pub(crate) fn setup_schema() -> Schema {
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
            role: Role
        }

        enum Role {
            ADMIN
            MEMBER
        }
        "#,
    )
    .unwrap()
    .build()
    .unwrap()
}

pub(crate) fn setup_context(schema: &Schema, document: &str) -> CompilerContext {
    let mut builder = DocumentBuilder::new(schema);
    builder.add_from_str(document).unwrap();
    builder.build().unwrap()
}
