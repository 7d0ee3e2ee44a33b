use serde::{Deserialize, Serialize};

/// Service-discovery manifest requested by the viewer on startup.
pub const SERVICES_PATH: &str = "/services.json";
/// Full document, mounted under the UI prefix.
pub const DOCUMENT_PATH: &str = "/swagger.json";
/// Legacy: document with the group list attached under `urls`.
pub const SWAGGER_CONFIG_PATH: &str = "/v3/api-docs/swagger-config";
/// Legacy: the group list alone.
pub const SWAGGER_RESOURCES_PATH: &str = "/swagger-resources";
/// Legacy: per-group documents live below this prefix.
pub const GROUP_DOCS_PREFIX: &str = "/api-docs/";

/// Query parameter naming the requested group.
pub const GROUP_PARAM: &str = "groupName";
/// Group name that selects every operation.
pub const ALL_GROUP: &str = "全部";
/// Version string advertised to the viewer.
pub const SWAGGER_VERSION: &str = "3.0.0";

/// Which set of endpoints an adapter answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    /// `/services.json` and `{prefix}/swagger.json`.
    #[default]
    Current,
    /// Tag-grouped discovery (`swagger-config`, `swagger-resources`, `api-docs`).
    Legacy,
    /// Both; current routes are matched first.
    Both,
}

impl Protocol {
    pub fn serves_current(self) -> bool {
        matches!(self, Protocol::Current | Protocol::Both)
    }

    pub fn serves_legacy(self) -> bool {
        matches!(self, Protocol::Legacy | Protocol::Both)
    }
}

/// An endpoint owned by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Services,
    Document,
    SwaggerConfig,
    SwaggerResources,
    GroupDocument,
}

/// Match a request path against the routes enabled by `protocol`.
///
/// Comparisons are exact: no trailing-slash or case normalization.
pub fn resolve(protocol: Protocol, prefix: &str, path: &str) -> Option<Route> {
    if protocol.serves_current() {
        if path == SERVICES_PATH {
            return Some(Route::Services);
        }
        if path.strip_prefix(prefix) == Some(DOCUMENT_PATH) {
            return Some(Route::Document);
        }
    }

    if protocol.serves_legacy() {
        if path == SWAGGER_CONFIG_PATH {
            return Some(Route::SwaggerConfig);
        }
        if path == SWAGGER_RESOURCES_PATH {
            return Some(Route::SwaggerResources);
        }
        if path.starts_with(GROUP_DOCS_PREFIX) {
            return Some(Route::GroupDocument);
        }
    }

    None
}

/// URL of the full document for a given UI prefix.
pub fn document_url(prefix: &str) -> String {
    format!("{prefix}{DOCUMENT_PATH}")
}

/// URL of a legacy group document for a given UI prefix.
pub fn group_url(prefix: &str, group: &str) -> String {
    format!("{prefix}{GROUP_DOCS_PREFIX}{group}")
}
