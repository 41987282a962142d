//! Pipeline composition: combines all middleware layers into a single service stack.

use serde_json::Value as Json;
use tower::ServiceBuilder;

use super::classify::ClassifyLayer;
use super::metrics::MetricsLayer;
use crate::service::error::RouteError;
use crate::service::router::ResourceRouter;

/// Build the routing pipeline by wrapping a `ResourceRouter` with middleware layers.
///
/// Layer order (outermost to innermost):
/// 1. `ClassifyLayer` -- turn raw JSON into a typed descriptor (fail fast on bad tags)
/// 2. `MetricsLayer` -- record timing and outcome (closest to the actual handler)
///
/// The returned service implements `tower::Service<serde_json::Value>`.
#[must_use]
pub fn build_route_pipeline<R>(
    router: ResourceRouter<R>,
) -> impl tower::Service<Json, Response = R, Error = RouteError>
where
    R: Send + 'static,
{
    ServiceBuilder::new()
        .layer(ClassifyLayer)
        .layer(MetricsLayer)
        .service(router)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
