//! Schema text scanning.
//!
//! The scanner works on a normalised copy of the schema: block strings,
//! directives and comments are removed and whitespace is collapsed, so every
//! later pattern can assume single spaces between tokens. Definitions are then
//! located with a keyword pattern and their bodies cut out with a balanced-brace
//! scan.
//!
//! The accepted grammar is a practical subset: flat field lists and a single,
//! non-nested argument list per operation field. Anything that does not match
//! simply contributes nothing.

use std::sync::LazyLock;

use graphgen_define::{FieldDef, OperationFieldDef};
use regex::Regex;
use strum::{AsRefStr, Display, EnumIter};
use tracing::{debug, trace};

use crate::errors::GeneratorError;

static BLOCK_STRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""""[\s\S]*?""""#).expect("Invalid block string regex"));

static DIRECTIVE_WITH_ARGS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@[A-Za-z0-9_]+\([^)]*\)").expect("Invalid directive regex")
});

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@[A-Za-z0-9_]+").expect("Invalid directive regex"));

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)#.*$").expect("Invalid comment regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// `name: Type` where the type is made of brackets, bangs and word characters.
static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)\s*:\s*([!\[\]A-Za-z0-9_]+)").expect("Invalid field regex")
});

/// `name(args): Type` with an optional, non-nested argument list.
static OPERATION_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)\s*(\([^)]*\))?\s*:\s*([!\[\]A-Za-z0-9_]+)")
        .expect("Invalid operation field regex")
});

static ENUM_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("Invalid enum value regex"));

static TYPE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&header_pattern(Keyword::Type)).expect("Invalid type header regex")
});

static INPUT_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&header_pattern(Keyword::Input)).expect("Invalid input header regex")
});

static ENUM_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&header_pattern(Keyword::Enum)).expect("Invalid enum header regex")
});

/// A keyword that introduces a definition block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Type,
    Input,
    Enum,
}

impl Keyword {
    fn header_re(self) -> &'static Regex {
        match self {
            Self::Type => &TYPE_HEADER_RE,
            Self::Input => &INPUT_HEADER_RE,
            Self::Enum => &ENUM_HEADER_RE,
        }
    }
}

/// Builds the pattern that locates `keyword Name ... {` headers.
///
/// `extend` is accepted in front of the keyword. The header may not cross a
/// closing brace, which keeps a keyword-like word inside another body from
/// swallowing the next definition.
fn header_pattern(keyword: Keyword) -> String {
    format!(
        r"\b(?:extend\s+)?{}\s+([A-Za-z_][A-Za-z0-9_]*)[^{{}}]*\{{",
        keyword.as_ref()
    )
}

/// A named definition block cut out of normalised schema text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDefinition<'a> {
    pub name: &'a str,
    /// The trimmed text between the opening brace and its matching close.
    pub body: &'a str,
}

/// Normalises schema text for scanning.
///
/// Removes `"""` block strings, `@directive(...)` and `@directive` tokens and
/// `#` line comments, then collapses every whitespace run to a single space.
///
/// ## Errors
///
/// Returns `GeneratorError::EmptySchema` if nothing remains.
///
/// ## Examples
///
/// ```
/// use graphgen_gen::parser::preprocess;
///
/// let text = "\"\"\"A user\"\"\"\ntype User @key(fields: \"id\") {\n  id: ID! # primary\n}";
/// assert_eq!(preprocess(text).unwrap(), "type User { id: ID! }");
/// assert!(preprocess("  # nothing here\n").is_err());
/// ```
pub fn preprocess(text: &str) -> Result<String, GeneratorError> {
    let text = BLOCK_STRING_RE.replace_all(text, "");
    let text = DIRECTIVE_WITH_ARGS_RE.replace_all(&text, "");
    let text = DIRECTIVE_RE.replace_all(&text, "");
    let text = COMMENT_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");

    let normalized = text.trim();
    if normalized.is_empty() {
        return Err(GeneratorError::EmptySchema);
    }

    Ok(normalized.to_string())
}

/// Finds every `keyword Name { ... }` block in normalised schema text.
///
/// Blocks whose braces never balance are skipped.
///
/// ## Examples
///
/// ```
/// use graphgen_gen::parser::{Keyword, extract_definitions};
///
/// let text = "type A { x: Int } extend type B { y: A } input C { z: Int }";
/// let defs = extract_definitions(text, Keyword::Type);
/// let names: Vec<_> = defs.iter().map(|d| d.name).collect();
/// assert_eq!(names, vec!["A", "B"]);
/// assert_eq!(defs[1].body, "y: A");
/// ```
pub fn extract_definitions(text: &str, keyword: Keyword) -> Vec<RawDefinition<'_>> {
    let mut result = Vec::new();

    for captures in keyword.header_re().captures_iter(text) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        // The header match always ends on the opening brace
        let brace_pos = whole.end() - 1;

        match extract_block_body(text, brace_pos) {
            Some(body) => result.push(RawDefinition {
                name: name.as_str(),
                body,
            }),
            None => debug!(
                %keyword,
                name = name.as_str(),
                "Skipping definition with unbalanced braces"
            ),
        }
    }

    result
}

/// Returns the body of the first `keyword name { ... }` block, if present.
pub fn find_definition_body<'a>(text: &'a str, keyword: Keyword, name: &str) -> Option<&'a str> {
    extract_definitions(text, keyword)
        .into_iter()
        .find(|definition| definition.name == name)
        .map(|definition| definition.body)
}

/// Cuts out the trimmed body of the block that opens at `brace_pos`.
///
/// Keeps a depth counter so nested braces inside the body are carried along.
/// Returns `None` if `brace_pos` is not an opening brace or the block never
/// closes.
pub fn extract_block_body(text: &str, brace_pos: usize) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.get(brace_pos) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let start = brace_pos + 1;

    for (index, byte) in bytes.iter().enumerate().skip(brace_pos) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..index].trim());
                }
            }
            _ => {}
        }
    }

    None
}

/// Scans a definition body for `name: Type` pairs.
///
/// ## Examples
///
/// ```
/// use graphgen_gen::parser::extract_fields;
///
/// let fields = extract_fields("id: ID! tags: [String!] broken: ");
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[1].ty.raw, "[String!]");
/// ```
pub fn extract_fields(body: &str) -> Vec<FieldDef> {
    FIELD_RE
        .captures_iter(body)
        .filter_map(|captures| {
            let name = captures.get(1)?.as_str();
            let ty = captures.get(2)?.as_str();
            Some(FieldDef::new(name, ty))
        })
        .collect()
}

/// Scans a `Query`/`Mutation` body for operation fields.
///
/// Arguments are read from the optional parenthesised list with the same
/// `name: Type` scan as plain fields, so commas and whitespace both separate
/// them and default values are ignored.
///
/// ## Examples
///
/// ```
/// use graphgen_gen::parser::extract_operation_fields;
///
/// let ops = extract_operation_fields("user(id: ID!): User users(first: Int, after: Cursor): [User!]! me: User");
/// assert_eq!(ops.len(), 3);
/// assert_eq!(ops[1].args.len(), 2);
/// assert!(ops[2].args.is_empty());
/// ```
pub fn extract_operation_fields(body: &str) -> Vec<OperationFieldDef> {
    OPERATION_FIELD_RE
        .captures_iter(body)
        .filter_map(|captures| {
            let name = captures.get(1)?.as_str();
            let return_type = captures.get(3)?.as_str();
            let args = captures
                .get(2)
                .map(|list| {
                    let inner = list.as_str().trim_matches(|c| c == '(' || c == ')');
                    extract_fields(inner)
                })
                .unwrap_or_default();

            trace!(field = name, args = args.len(), return_type, "Found operation field");
            Some(OperationFieldDef::new(name, args, return_type))
        })
        .collect()
}

/// Collects every bare word in an enum body, in order and without dedup.
pub fn extract_enum_values(body: &str) -> Vec<String> {
    ENUM_VALUE_RE
        .find_iter(body)
        .map(|value| value.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_strips_block_strings() {
        let text = "\"\"\"\nMulti-line\n{ with braces }\n\"\"\"\ntype A { x: Int }";
        assert_eq!(preprocess(text).unwrap(), "type A { x: Int }");
    }

    #[test]
    fn preprocess_strips_directives() {
        let text = "type A @cacheControl(maxAge: 30) { x: Int @deprecated y: String }";
        assert_eq!(preprocess(text).unwrap(), "type A { x: Int y: String }");
    }

    #[test]
    fn preprocess_strips_comments_per_line() {
        let text = "# header\ntype A {\n  x: Int # trailing\n  y: Int\n}";
        assert_eq!(preprocess(text).unwrap(), "type A { x: Int y: Int }");
    }

    #[test]
    fn preprocess_collapses_whitespace() {
        let text = "\r\n\ttype   A\r\n{\n\n x :\tInt }  ";
        assert_eq!(preprocess(text).unwrap(), "type A { x : Int }");
    }

    #[test]
    fn preprocess_rejects_empty() {
        assert!(matches!(preprocess(""), Err(GeneratorError::EmptySchema)));
        assert!(matches!(
            preprocess("\"\"\"only a description\"\"\"\n# and a comment"),
            Err(GeneratorError::EmptySchema)
        ));
    }

    #[test]
    fn extract_no_definitions() {
        assert!(extract_definitions("scalar Date", Keyword::Type).is_empty());
    }

    #[test]
    fn extract_extend_type() {
        let defs = extract_definitions("extend type User { age: Int }", Keyword::Type);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "User");
        assert_eq!(defs[0].body, "age: Int");
    }

    #[test]
    fn extract_with_implements_clause() {
        let defs = extract_definitions("type User implements Node & Entity { id: ID! }", Keyword::Type);
        assert_eq!(defs[0].name, "User");
        assert_eq!(defs[0].body, "id: ID!");
    }

    #[test]
    fn extract_nested_braces() {
        let text = "type A { x: Int { nested { deep } } y: Int } type B { z: Int }";
        let defs = extract_definitions(text, Keyword::Type);
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].body, "x: Int { nested { deep } } y: Int");
        assert_eq!(defs[1].body, "z: Int");
    }

    #[test]
    fn extract_unbalanced_is_skipped() {
        let defs = extract_definitions("type A { x: Int", Keyword::Type);
        assert!(defs.is_empty());
    }

    #[test]
    fn keyword_requires_word_boundary() {
        let defs = extract_definitions("subtype A { x: Int }", Keyword::Type);
        assert!(defs.is_empty());
    }

    #[test]
    fn header_does_not_cross_closing_brace() {
        // `input` here is an enum value, not a definition keyword
        let text = "enum Dir { input output } type Foo { a: Int }";
        assert!(extract_definitions(text, Keyword::Input).is_empty());
        assert_eq!(extract_definitions(text, Keyword::Type)[0].name, "Foo");
    }

    #[test]
    fn find_first_matching_body() {
        let text = "type QueryResult { ok: Boolean } type Query { a: Int } type Query { b: Int }";
        assert_eq!(find_definition_body(text, Keyword::Type, "Query"), Some("a: Int"));
        assert_eq!(find_definition_body(text, Keyword::Type, "Mutation"), None);
    }

    #[test]
    fn block_body_requires_open_brace() {
        assert_eq!(extract_block_body("abc", 0), None);
        assert_eq!(extract_block_body("{ }", 0), Some(""));
        assert_eq!(extract_block_body("x{a{b}c}", 1), Some("a{b}c"));
    }

    #[test]
    fn extract_fields_in_order() {
        let fields = extract_fields("id: ID! name: String friends: [User!]!");
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "friends"]);
        assert!(fields[2].ty.is_list);
        assert!(!fields[2].ty.nullable);
    }

    #[test]
    fn extract_fields_skips_malformed() {
        let fields = extract_fields("id ID! : name: String");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "name");
    }

    #[test]
    fn extract_fields_ignores_default_values() {
        let fields = extract_fields("limit: Int = 10, order: String = \"asc\"");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].ty.raw, "Int");
    }

    #[test]
    fn operation_args_with_whitespace_separators() {
        let ops = extract_operation_fields("search(term: String! limit: Int): [Result]");
        assert_eq!(ops.len(), 1);
        let args: Vec<_> = ops[0].args.iter().map(|a| (a.name.as_str(), a.ty.raw.as_str())).collect();
        assert_eq!(args, vec![("term", "String!"), ("limit", "Int")]);
        assert_eq!(ops[0].return_type.raw, "[Result]");
    }

    #[test]
    fn operation_without_args() {
        let ops = extract_operation_fields("viewer: User");
        assert_eq!(ops[0].name, "viewer");
        assert!(ops[0].args.is_empty());
    }

    #[test]
    fn operation_with_empty_arg_list() {
        let ops = extract_operation_fields("ping(): Boolean");
        assert_eq!(ops.len(), 1);
        assert!(ops[0].args.is_empty());
    }

    #[test]
    fn enum_values_keep_duplicates() {
        assert_eq!(
            extract_enum_values("A B A C"),
            vec!["A".to_string(), "B".to_string(), "A".to_string(), "C".to_string()]
        );
        assert!(extract_enum_values("").is_empty());
    }
}
