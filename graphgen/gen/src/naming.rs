//! Identifier derivation for generated Rust code.
//!
//! Schema names are camelCase, PascalCase or SCREAMING_SNAKE_CASE and may
//! collide with Rust keywords. Everything here turns such names into valid
//! Rust identifiers:
//!
//! - `createUser` -> `create_user` (fields, arguments)
//! - `IN_PROGRESS` -> `InProgress` (enum variants)
//! - `offerID` -> `OFFER_ID` (field name constants)
//! - `type` -> `r#type`, `self` -> `self_`
//!
//! ## Examples
//!
//! ```
//! use graphgen_gen::naming::{to_pascal_case, to_screaming_snake_case, to_snake_case};
//!
//! assert_eq!(to_snake_case("perPage"), "per_page");
//! assert_eq!(to_pascal_case("IN_PROGRESS"), "InProgress");
//! assert_eq!(to_screaming_snake_case("offerID"), "OFFER_ID");
//! ```

use std::collections::HashSet;

use proc_macro2::{Ident, Span};

/// Keywords that can be written as raw identifiers (`r#type`).
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers and get a trailing underscore.
const RESERVED_NAMES: &[&str] = &["crate", "self", "Self", "super"];

/// Splits a schema name into words.
///
/// Underscores separate words, and so do case changes:
/// - "createUser" -> ["create", "User"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "IN_PROGRESS" -> ["IN", "PROGRESS"]
/// - "v2Beta" -> ["v2", "Beta"]
pub fn split_words(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|segment| !segment.is_empty())
        .flat_map(split_camel_case)
        .collect()
}

fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for i in 1..chars.len() {
        let (offset, current) = chars[i];
        let prev = chars[i - 1].1;

        // Split before an uppercase letter that ends a lowercase run or a digit
        // run, and before the last capital of an acronym followed by lowercase
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if offset > word_start {
                words.push(&s[word_start..offset]);
            }
            word_start = offset;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}

/// Converts a name to `snake_case`.
pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a name to `PascalCase`, lowercasing the rest of every word.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// Converts a name to `SCREAMING_SNAKE_CASE`.
pub fn to_screaming_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Uppercases the first character and leaves the rest untouched.
///
/// Operation names use this form so `createUser` becomes `CreateUser` and
/// `userByID` stays recognisable as `UserByID`.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Makes a derived name usable as an identifier.
///
/// Characters outside `[A-Za-z0-9_]` become underscores. Empty or all-underscore names fall
/// back to `fallback`, names starting with a digit get a leading underscore and keywords that
/// cannot be raw get a trailing one.
/// Raw-able keywords are returned unchanged; [`ident`] writes them as `r#..`.
pub fn sanitize(name: String, fallback: &str) -> String {
    let name: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    let name = if name.chars().all(|c| c == '_') {
        fallback.to_string()
    } else {
        name
    };

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{name}")
    } else if RESERVED_NAMES.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Returns `true` if the name must be written as a raw identifier.
pub fn is_raw_keyword(name: &str) -> bool {
    RAW_KEYWORDS.contains(&name)
}

/// Builds an identifier, using raw syntax for keywords.
///
/// The name must already be sanitized.
pub fn ident(name: &str) -> Ident {
    if is_raw_keyword(name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}

/// The snake_case identifier text for a field or argument.
pub fn field_name(sdl_name: &str) -> String {
    sanitize(to_snake_case(sdl_name), "field")
}

/// The PascalCase identifier text for an enum variant.
pub fn variant_name(sdl_value: &str) -> String {
    sanitize(to_pascal_case(sdl_value), "Value")
}

/// The identifier text for a generated type named after a schema definition.
///
/// Schema type names are kept as written.
pub fn type_name(sdl_name: &str) -> String {
    sanitize(sdl_name.to_string(), "Type")
}

/// The constant name holding a field's schema name.
pub fn constant_name(sdl_name: &str) -> String {
    sanitize(to_screaming_snake_case(sdl_name), "FIELD")
}

/// Hands out identifiers that are unique within one scope.
///
/// A name that is already taken gets a numeric suffix: `id`, `id_2`, `id_3`.
///
/// ## Examples
///
/// ```
/// use graphgen_gen::naming::UniqueNames;
///
/// let mut names = UniqueNames::default();
/// assert_eq!(names.claim("user_id".to_string()), "user_id");
/// assert_eq!(names.claim("user_id".to_string()), "user_id_2");
/// ```
#[derive(Debug, Default)]
pub struct UniqueNames {
    used: HashSet<String>,
}

impl UniqueNames {
    /// Creates a scope with some names already reserved.
    pub fn with_reserved(reserved: &[&str]) -> Self {
        Self {
            used: reserved.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Claims `name`, or the first free suffixed variant of it.
    pub fn claim(&mut self, name: String) -> String {
        if self.used.insert(name.clone()) {
            return name;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{name}_{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
