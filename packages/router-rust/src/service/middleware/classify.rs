//! Classification middleware: accepts raw JSON descriptors in front of a typed service.

use std::future::{ready, Future};
use std::pin::Pin;
use std::task::{Context, Poll};

use serde_json::Value as Json;
use sourcegate_core::ResourceDescriptor;
use tower::{Layer, Service};

use crate::service::classify::classify;
use crate::service::error::RouteError;

/// Tower layer turning a `Service<ResourceDescriptor>` into a `Service<serde_json::Value>`.
#[derive(Debug, Clone)]
pub struct ClassifyLayer;

impl<S> Layer<S> for ClassifyLayer {
    type Service = ClassifyService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ClassifyService { inner }
    }
}

/// Classifies each raw request; rejected requests never reach the inner service.
#[derive(Debug, Clone)]
pub struct ClassifyService<S> {
    inner: S,
}

impl<S, R> Service<Json> for ClassifyService<S>
where
    S: Service<ResourceDescriptor, Response = R, Error = RouteError>,
    S::Future: Send + 'static,
    R: Send + 'static,
{
    type Response = R;
    type Error = RouteError;
    type Future = Pin<Box<dyn Future<Output = Result<R, RouteError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, raw: Json) -> Self::Future {
        match classify(raw) {
            Ok(descriptor) => Box::pin(self.inner.call(descriptor)),
            Err(err) => {
                tracing::warn!(error = %err, "rejected descriptor");
                Box::pin(ready(Err(err)))
            }
        }
    }
}
