use std::sync::{Arc, PoisonError, RwLock};

use http::StatusCode;
use log::{debug, warn};
use serde_json::Value;

use crate::config::{AdapterConfig, DEFAULT_LOCATION, DEFAULT_NAME};
use crate::descriptor::ServiceDescriptor;
use crate::error::DocumentError;
use crate::grouping::{filter_by_tag, tag_groups, with_groups};
use crate::parse::kind_name;
use crate::route::{self, ALL_GROUP, GROUP_PARAM, Protocol, Route};

/// Result of classifying a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The adapter owns the route; send `body` as JSON with `status`.
    Handled { status: StatusCode, body: Value },
    /// Not an adapter route; pass the request on unchanged.
    NotHandled,
}

impl Outcome {
    pub fn ok(body: Value) -> Self {
        Outcome::Handled {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn error(err: &DocumentError) -> Self {
        Outcome::Handled {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: err.to_body(),
        }
    }

    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Handled { .. })
    }
}

/// Group requested by a legacy `/api-docs/...` query string. The first `groupName` wins.
fn requested_group(query: Option<&str>) -> String {
    let pairs = match query.map(serde_urlencoded::from_str::<Vec<(String, String)>>) {
        Some(Ok(pairs)) => pairs,
        Some(Err(err)) => {
            warn!("ignoring undecodable query string: {err}");
            Vec::new()
        }
        None => Vec::new(),
    };
    pairs
        .into_iter()
        .find(|(key, _)| key == GROUP_PARAM)
        .map(|(_, group)| group)
        .unwrap_or_else(|| ALL_GROUP.to_string())
}

/// Serves a specification document to a documentation viewer.
///
/// Every response is built from a snapshot of the current document; nothing is
/// written back, so one adapter can be shared across concurrent requests.
#[derive(Debug)]
pub struct DocAdapter {
    document: RwLock<Option<Arc<Value>>>,
    name: String,
    location: String,
    protocol: Protocol,
}

impl Default for DocAdapter {
    fn default() -> Self {
        Self::new(Value::Object(Default::default()), DEFAULT_NAME)
    }
}

impl DocAdapter {
    /// A `null` document is treated the same as a missing one.
    pub fn new(document: impl Into<Option<Value>>, name: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Self::wrap(document.into())),
            name: name.into(),
            location: DEFAULT_LOCATION.to_string(),
            protocol: Protocol::default(),
        }
    }

    pub fn from_config(document: impl Into<Option<Value>>, config: &AdapterConfig) -> Self {
        Self::new(document, config.name.clone())
            .with_protocol(config.protocol)
            .with_location(config.location.clone())
    }

    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    fn wrap(document: Option<Value>) -> Option<Arc<Value>> {
        document.filter(|d| !d.is_null()).map(Arc::new)
    }

    /// Current document snapshot.
    pub fn document(&self) -> Option<Arc<Value>> {
        self.document
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap the served document. Requests already classifying keep their snapshot.
    pub fn replace_document(&self, document: impl Into<Option<Value>>) {
        let wrapped = Self::wrap(document.into());
        *self
            .document
            .write()
            .unwrap_or_else(PoisonError::into_inner) = wrapped;
    }

    fn checked_document(&self) -> Result<Arc<Value>, DocumentError> {
        match self.document() {
            None => Err(DocumentError::Missing),
            Some(doc) if !doc.is_object() => Err(DocumentError::NotAnObject(kind_name(&doc))),
            Some(doc) => Ok(doc),
        }
    }

    /// Decide whether `path` belongs to the adapter and build its response.
    ///
    /// `prefix` is where the viewer UI is mounted; `query` is the raw query string,
    /// only consulted for legacy group documents.
    pub fn classify(&self, prefix: &str, path: &str, query: Option<&str>) -> Outcome {
        let document = match self.checked_document() {
            Ok(document) => document,
            Err(err) => {
                warn!("cannot serve {path}: {err}");
                return Outcome::error(&err);
            }
        };

        let Some(route) = route::resolve(self.protocol, prefix, path) else {
            debug!("{path} is not a documentation route");
            return Outcome::NotHandled;
        };
        debug!("{path} matched {route:?}");

        match self.respond(route, &document, prefix, query) {
            Ok(body) => Outcome::ok(body),
            Err(err) => {
                let err = DocumentError::Encode(err.to_string());
                warn!("cannot serve {path}: {err}");
                Outcome::error(&err)
            }
        }
    }

    fn respond(
        &self,
        route: Route,
        document: &Value,
        prefix: &str,
        query: Option<&str>,
    ) -> Result<Value, serde_json::Error> {
        match route {
            Route::Services => {
                let descriptor = ServiceDescriptor::new(&self.name, prefix, &self.location);
                serde_json::to_value([descriptor])
            }
            Route::Document => Ok(document.clone()),
            Route::SwaggerConfig => with_groups(document, &tag_groups(document, prefix)),
            Route::SwaggerResources => serde_json::to_value(tag_groups(document, prefix)),
            Route::GroupDocument => {
                let group = requested_group(query);
                if group == ALL_GROUP {
                    Ok(document.clone())
                } else {
                    Ok(filter_by_tag(document, &group))
                }
            }
        }
    }
}
