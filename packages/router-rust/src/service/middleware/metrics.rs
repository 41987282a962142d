//! Metrics middleware for routing.
//!
//! Records dispatch duration and outcome using `tracing` spans.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use sourcegate_core::ResourceDescriptor;
use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::service::error::RouteError;

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments each dispatch with a `route` span.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

/// Service wrapper that records dispatch duration and outcome in tracing spans.
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

impl<S, R> Service<ResourceDescriptor> for MetricsService<S>
where
    S: Service<ResourceDescriptor, Response = R, Error = RouteError> + Send,
    S::Future: Send + 'static,
    R: Send + 'static,
{
    type Response = R;
    type Error = RouteError;
    type Future = Pin<Box<dyn Future<Output = Result<R, RouteError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, descriptor: ResourceDescriptor) -> Self::Future {
        let kind = descriptor.kind().as_str();

        let span = info_span!(
            "route",
            kind = kind,
            duration_us = tracing::field::Empty,
            outcome = tracing::field::Empty,
        );

        // Routers run their handler inside `call`, so timing starts here.
        let start = Instant::now();
        let fut = {
            let _enter = span.enter();
            self.inner.call(descriptor)
        };

        Box::pin(
            async move {
                let result = fut.await;
                let duration_us = start.elapsed().as_micros();

                let outcome = match &result {
                    Ok(_) => "ok",
                    Err(_) => "error",
                };

                #[allow(clippy::cast_possible_truncation)]
                let duration_u64 = duration_us as u64;
                tracing::Span::current().record("duration_us", duration_u64);
                tracing::Span::current().record("outcome", outcome);

                tracing::info!(
                    kind = kind,
                    duration_us = duration_u64,
                    outcome = outcome,
                    "descriptor routed"
                );

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::future::{ready, Ready};
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use sourcegate_core::ResourceKind;
    use tower::ServiceExt;

    use super::*;
    use crate::service::router::ResourceRouter;

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn recorded_durations(output: &str) -> Vec<u64> {
        output
            .split("duration_us=")
            .skip(1)
            .map(|rest| {
                rest.chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
                    .parse()
                    .unwrap()
            })
            .collect()
    }

    /// Echoes the kind it was called with.
    struct KindEcho;

    impl Service<ResourceDescriptor> for KindEcho {
        type Response = ResourceKind;
        type Error = RouteError;
        type Future = Ready<Result<ResourceKind, RouteError>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, descriptor: ResourceDescriptor) -> Self::Future {
            ready(Ok(descriptor.kind()))
        }
    }

    /// Always fails.
    struct Failing;

    impl Service<ResourceDescriptor> for Failing {
        type Response = ();
        type Error = RouteError;
        type Future = Ready<Result<(), RouteError>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, descriptor: ResourceDescriptor) -> Self::Future {
            ready(Err(RouteError::MissingHandler {
                kind: descriptor.kind(),
            }))
        }
    }

    #[tokio::test]
    async fn metrics_layer_passes_through_response() {
        let svc = MetricsLayer.layer(KindEcho);
        let kind = svc
            .oneshot(ResourceDescriptor::database("pg://x").unwrap())
            .await
            .unwrap();
        assert_eq!(kind, ResourceKind::Database);
    }

    #[tokio::test]
    async fn synchronous_handler_time_is_recorded_inside_span() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let router = ResourceRouter::builder()
            .on_file(|_| {
                tracing::info!("opening file");
                std::thread::sleep(Duration::from_millis(25));
                "file"
            })
            .on_database(|_| "db")
            .build()
            .unwrap();
        let out = MetricsLayer
            .layer(router)
            .oneshot(ResourceDescriptor::file("a.csv").unwrap())
            .await
            .unwrap();
        assert_eq!(out, "file");

        let logs = captured.contents();
        let handler_line = logs
            .lines()
            .find(|line| line.contains("opening file"))
            .unwrap();
        assert!(handler_line.contains(r#"route{kind="file""#), "{logs}");

        let durations = recorded_durations(&logs);
        assert!(!durations.is_empty(), "{logs}");
        assert!(durations.iter().all(|&us| us >= 20_000), "{logs}");
    }

    #[tokio::test]
    async fn metrics_layer_passes_through_error() {
        let svc = MetricsLayer.layer(Failing);
        let err = svc
            .oneshot(ResourceDescriptor::file("a.csv").unwrap())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RouteError::MissingHandler {
                kind: ResourceKind::File
            }
        );
    }
}
