//! The GraphQL multipart request protocol.
//!
//! A request with files is sent as `multipart/form-data` with:
//!
//! 1. `operations` - the JSON request body, with every upload variable set to `null`
//! 2. `map` - which file part fills which variable, e.g. `{"0": ["variables.file"]}`
//! 3. `0`, `1`, ... - the files themselves

use reqwest::multipart::Form;
use serde_json::{Map, Value, json};

use crate::error::ClientError;
use crate::upload::UploadFile;

/// Builds the JSON body of a GraphQL request. Empty variables are omitted.
pub fn request_body(document: &str, variables: Map<String, Value>) -> Value {
    let mut body = Map::new();
    body.insert("query".to_string(), Value::String(document.to_string()));
    if !variables.is_empty() {
        body.insert("variables".to_string(), Value::Object(variables));
    }
    Value::Object(body)
}

/// Normalizes an upload path to be rooted at `variables`.
///
/// `file` and `variables.file` both become `variables.file`.
pub fn variable_path(path: &str) -> String {
    if path == "variables" || path.starts_with("variables.") {
        path.to_string()
    } else {
        format!("variables.{path}")
    }
}

/// Sets the value at a dotted path below `variables` to `null`, creating
/// intermediate objects as needed. Numeric segments index into arrays.
pub fn null_at_path(variables: &mut Map<String, Value>, path: &str) {
    let relative = path.strip_prefix("variables.").unwrap_or(path);
    let segments: Vec<&str> = relative.split('.').filter(|s| !s.is_empty()).collect();

    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    let value = variables
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    null_in(value, rest);
}

fn null_in(value: &mut Value, segments: &[&str]) {
    let Some((head, rest)) = segments.split_first() else {
        *value = Value::Null;
        return;
    };
    if !matches!(value, Value::Array(_) | Value::Object(_)) {
        *value = Value::Object(Map::new());
    }

    let child = match value {
        Value::Array(items) => match head.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
            Some(child) => child,
            None => return,
        },
        Value::Object(map) => map
            .entry(head.to_string())
            .or_insert_with(|| Value::Object(Map::new())),
        _ => return,
    };
    null_in(child, rest);
}

/// Builds the `map` part: file index to the variable paths it fills.
pub fn upload_map<'a>(paths: impl IntoIterator<Item = &'a str>) -> Value {
    let map: Map<String, Value> = paths
        .into_iter()
        .enumerate()
        .map(|(index, path)| (index.to_string(), json!([variable_path(path)])))
        .collect();
    Value::Object(map)
}

/// Builds the multipart form for an operation with files.
pub(crate) async fn build_form(
    document: &str,
    mut variables: Map<String, Value>,
    uploads: Vec<(String, UploadFile)>,
) -> Result<Form, ClientError> {
    for (path, _) in &uploads {
        null_at_path(&mut variables, &variable_path(path));
    }

    let operations = request_body(document, variables);
    let map = upload_map(uploads.iter().map(|(path, _)| path.as_str()));

    let mut form = Form::new()
        .text("operations", serde_json::to_string(&operations)?)
        .text("map", serde_json::to_string(&map)?);

    for (index, (_, file)) in uploads.into_iter().enumerate() {
        form = form.part(index.to_string(), file.into_part().await?);
    }

    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn request_body_omits_empty_variables() {
        assert_eq!(
            request_body("query Ping { ping }", Map::new()),
            json!({ "query": "query Ping { ping }" })
        );
        assert_eq!(
            request_body("q", vars(json!({ "id": "1" }))),
            json!({ "query": "q", "variables": { "id": "1" } })
        );
    }

    #[test]
    fn paths_are_rooted_at_variables() {
        assert_eq!(variable_path("file"), "variables.file");
        assert_eq!(variable_path("variables.file"), "variables.file");
        assert_eq!(variable_path("input.files.0"), "variables.input.files.0");
    }

    #[test]
    fn nulls_top_level_variable() {
        let mut variables = vars(json!({ "bookId": "7", "file": "placeholder" }));
        null_at_path(&mut variables, "variables.file");
        assert_eq!(Value::Object(variables), json!({ "bookId": "7", "file": null }));
    }

    #[test]
    fn nulls_nested_and_indexed_paths() {
        let mut variables = vars(json!({ "input": { "files": ["a", "b"], "title": "x" } }));
        null_at_path(&mut variables, "variables.input.files.1");
        assert_eq!(
            Value::Object(variables),
            json!({ "input": { "files": ["a", null], "title": "x" } })
        );
    }

    #[test]
    fn creates_missing_objects() {
        let mut variables = Map::new();
        null_at_path(&mut variables, "input.cover");
        assert_eq!(Value::Object(variables), json!({ "input": { "cover": null } }));
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut variables = vars(json!({ "files": ["a"] }));
        null_at_path(&mut variables, "files.3");
        assert_eq!(Value::Object(variables), json!({ "files": ["a"] }));
    }

    #[test]
    fn map_numbers_files_in_order() {
        assert_eq!(
            upload_map(["file", "variables.extra"]),
            json!({ "0": ["variables.file"], "1": ["variables.extra"] })
        );
    }
}
