use indexmap::IndexSet;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::route::{ALL_GROUP, SWAGGER_VERSION, group_url};

/// Path item keys that hold operations.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// One entry of the legacy group list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagGroup {
    pub name: String,
    pub url: String,
    #[serde(rename = "swaggerVersion")]
    pub swagger_version: String,
    #[serde(rename = "servicePath")]
    pub service_path: String,
}

impl TagGroup {
    pub fn new(prefix: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: group_url(prefix, name),
            swagger_version: SWAGGER_VERSION.to_string(),
            service_path: String::new(),
        }
    }
}

fn is_method(key: &str) -> bool {
    HTTP_METHODS.iter().any(|m| m.eq_ignore_ascii_case(key))
}

/// The `paths` object, or `None` when absent or malformed.
fn paths_of(document: &Value) -> Option<&Map<String, Value>> {
    match document.get("paths") {
        Some(Value::Object(paths)) => Some(paths),
        Some(other) => {
            warn!("ignoring `paths` of type {}", crate::parse::kind_name(other));
            None
        }
        None => None,
    }
}

/// Operation entries of a path item as `(method, operation)` pairs.
fn operations(path_item: &Value) -> impl Iterator<Item = (&String, &Value)> {
    path_item
        .as_object()
        .into_iter()
        .flatten()
        .filter(|(key, op)| is_method(key) && op.is_object())
}

fn operation_tags(operation: &Value) -> impl Iterator<Item = &str> {
    operation
        .get("tags")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
}

/// Distinct tags across every operation, in order of first appearance.
pub fn collect_tags(document: &Value) -> IndexSet<String> {
    let mut tags = IndexSet::new();
    for path_item in paths_of(document).into_iter().flat_map(Map::values) {
        for (_, operation) in operations(path_item) {
            for tag in operation_tags(operation) {
                if !tags.contains(tag) {
                    tags.insert(tag.to_string());
                }
            }
        }
    }
    tags
}

/// Group list: the "all" group followed by one group per distinct tag.
pub fn tag_groups(document: &Value, prefix: &str) -> Vec<TagGroup> {
    std::iter::once(TagGroup::new(prefix, ALL_GROUP))
        .chain(
            collect_tags(document)
                .iter()
                .map(|tag| TagGroup::new(prefix, tag)),
        )
        .collect()
}

/// Copy of `document` with the group list attached under `urls`.
pub fn with_groups(document: &Value, groups: &[TagGroup]) -> Result<Value, serde_json::Error> {
    let mut augmented = document.clone();
    if let Value::Object(root) = &mut augmented {
        root.insert("urls".to_string(), serde_json::to_value(groups)?);
    }
    Ok(augmented)
}

/// Copy of `document` whose `paths` keeps only operations tagged with `tag`.
///
/// Path items with no surviving operation are omitted. Non-operation fields of a
/// surviving path item (`summary`, `parameters`, ...) are kept. The input is never modified.
pub fn filter_by_tag(document: &Value, tag: &str) -> Value {
    let Value::Object(root) = document else {
        return document.clone();
    };

    let mut filtered = Some(Value::Object(filter_paths(paths_of(document), tag)));
    let mut out = Map::with_capacity(root.len() + 1);
    for (key, value) in root {
        match filtered.take_if(|_| key == "paths") {
            Some(paths) => out.insert(key.clone(), paths),
            None => out.insert(key.clone(), value.clone()),
        };
    }
    if let Some(paths) = filtered {
        out.insert("paths".to_string(), paths);
    }
    Value::Object(out)
}

fn filter_paths(paths: Option<&Map<String, Value>>, tag: &str) -> Map<String, Value> {
    let mut filtered = Map::new();
    for (path, path_item) in paths.into_iter().flatten() {
        let Some(item) = path_item.as_object() else {
            continue;
        };
        let matched = operations(path_item)
            .any(|(_, operation)| operation_tags(operation).any(|t| t == tag));
        if !matched {
            continue;
        }

        let kept: Map<String, Value> = item
            .iter()
            .filter(|(key, value)| {
                !is_method(key)
                    || (value.is_object() && operation_tags(value).any(|t| t == tag))
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        filtered.insert(path.clone(), Value::Object(kept));
    }
    filtered
}
