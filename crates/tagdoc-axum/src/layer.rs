//! Tower middleware: the wrapped service is the continuation.

use std::future::{Future, ready};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use axum::response::Response;
use log::debug;
use tower::{Layer, Service, ServiceExt};

use tagdoc_core::config::AdapterConfig;
use tagdoc_core::{DocAdapter, Outcome};

use crate::response::json_response;

type BoxFuture<T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send>>;

/// Layer answering documentation routes before the inner service sees them.
#[derive(Clone)]
pub struct DocAdapterLayer {
    adapter: Arc<DocAdapter>,
    prefix: Arc<str>,
}

impl DocAdapterLayer {
    pub fn new(adapter: Arc<DocAdapter>) -> Self {
        Self {
            adapter,
            prefix: Arc::from(""),
        }
    }

    /// Build the adapter and layer from a loaded config.
    pub fn from_config(document: serde_json::Value, config: &AdapterConfig) -> Self {
        Self::new(Arc::new(DocAdapter::from_config(document, config)))
            .with_prefix(config.prefix.as_str())
    }

    /// Prefix the viewer UI is mounted under.
    pub fn with_prefix(mut self, prefix: impl Into<Arc<str>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn adapter(&self) -> &Arc<DocAdapter> {
        &self.adapter
    }
}

impl<S> Layer<S> for DocAdapterLayer {
    type Service = DocAdapterService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DocAdapterService {
            inner,
            adapter: self.adapter.clone(),
            prefix: self.prefix.clone(),
        }
    }
}

#[derive(Clone)]
pub struct DocAdapterService<S> {
    inner: S,
    adapter: Arc<DocAdapter>,
    prefix: Arc<str>,
}

impl<S, B> Service<Request<B>> for DocAdapterService<S>
where
    S: Service<Request<B>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<Response, S::Error>;

    /// Always ready: the inner service is only driven to readiness for requests it receives.
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        let uri = request.uri();
        match self.adapter.classify(&self.prefix, uri.path(), uri.query()) {
            Outcome::Handled { status, body } => {
                debug!("{} answered with {status}", uri.path());
                Box::pin(ready(Ok(json_response(status, body))))
            }
            Outcome::NotHandled => {
                let clone = self.inner.clone();
                let inner = std::mem::replace(&mut self.inner, clone);
                Box::pin(inner.oneshot(request))
            }
        }
    }
}
