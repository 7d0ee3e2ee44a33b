//! `axum::middleware::from_fn_with_state` flavour: state in, awaited `next` out.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use log::debug;

use tagdoc_core::config::AdapterConfig;
use tagdoc_core::{DocAdapter, Outcome};

use crate::response::json_response;

/// State handed to [`serve_docs`].
#[derive(Clone)]
pub struct DocState {
    adapter: Arc<DocAdapter>,
    prefix: Arc<str>,
}

impl DocState {
    pub fn new(adapter: Arc<DocAdapter>, prefix: impl Into<Arc<str>>) -> Self {
        Self {
            adapter,
            prefix: prefix.into(),
        }
    }

    pub fn from_config(document: serde_json::Value, config: &AdapterConfig) -> Self {
        Self::new(
            Arc::new(DocAdapter::from_config(document, config)),
            config.prefix.as_str(),
        )
    }

    pub fn adapter(&self) -> &Arc<DocAdapter> {
        &self.adapter
    }
}

/// Answer documentation routes, otherwise run the rest of the stack.
///
/// ```ignore
/// let app = Router::new()
///     .fallback_service(ServeDir::new(tagdoc_axum::ui_asset_root()))
///     .layer(axum::middleware::from_fn_with_state(state, tagdoc_axum::serve_docs));
/// ```
pub async fn serve_docs(State(state): State<DocState>, request: Request, next: Next) -> Response {
    let uri = request.uri();
    match state
        .adapter
        .classify(&state.prefix, uri.path(), uri.query())
    {
        Outcome::Handled { status, body } => {
            debug!("{} answered with {status}", uri.path());
            json_response(status, body)
        }
        Outcome::NotHandled => next.run(request).await,
    }
}
