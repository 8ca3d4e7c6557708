//! Shared test utilities for graphgen-gen tests.
//!
//! Provides a realistic schema fixture and a few helpers so individual test
//! modules don't each carry their own copy.

use graphgen_define::{FieldDef, SchemaModel};

use crate::analyzer::analyze;

/// A small but complete schema: comments, descriptions, directives, a
/// self-referencing type, an enum used as argument and return
/// type, and an input type used by a mutation.
pub const SAMPLE_SCHEMA: &str = r#"
# Users and their posts.
schema {
  query: Query
  mutation: Mutation
}

"""
A registered account.
"""
type User @key(fields: "id") {
  id: ID!
  name: String # display name
  email: String!
  role: Role
  manager: User
  posts: [Post!]!
  createdAt: DateTime
}

type Post {
  id: ID!
  title: String!
  score: Float
  published: Boolean!
  author: User
  tags: [String]
}

enum Role {
  ADMIN
  EDITOR @deprecated(reason: "Use ADMIN")
  VIEWER
}

input CreateUserInput {
  name: String!
  email: String
  role: Role
}

scalar DateTime

type Query {
  me: User
  user(id: ID!): User
  users(first: Int, perPage: Int): [User!]!
  defaultRole(scope: Role): Role
}

type Mutation {
  createUser(input: CreateUserInput!): User
  deleteUser(id: ID!): Boolean
}
"#;

/// Names of a field list, in order.
pub fn field_names(fields: &[FieldDef]) -> Vec<String> {
    fields.iter().map(|f| f.name.clone()).collect()
}

/// The analysed [`SAMPLE_SCHEMA`].
pub fn sample_model() -> SchemaModel {
    analyze(SAMPLE_SCHEMA).expect("sample schema analyses")
}
