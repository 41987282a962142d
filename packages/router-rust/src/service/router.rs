//! Resource routing: dispatches a `ResourceDescriptor` to the handler for its kind.

use std::fmt;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use serde_json::Value as Json;
use sourcegate_core::{DatabaseSource, FileSource, ResourceDescriptor, ResourceKind};
use tower::Service;
use tracing::{debug, warn};

use super::classify::classify;
use super::error::RouteError;

// ---------------------------------------------------------------------------
// Handler types
// ---------------------------------------------------------------------------

/// A shared handler receiving one narrowed payload.
type Handler<S, R> = Arc<dyn Fn(S) -> R + Send + Sync>;

/// A handler covering every resource kind.
///
/// Implementing this trait is the compile-time form of registration: a new
/// resource kind adds a method here, and every implementor stops compiling
/// until it handles it.
pub trait ResourceHandler: Send + Sync + 'static {
    type Output;

    fn on_file(&self, source: FileSource) -> Self::Output;

    fn on_database(&self, source: DatabaseSource) -> Self::Output;
}

// ---------------------------------------------------------------------------
// ResourceRouter
// ---------------------------------------------------------------------------

/// Routes `ResourceDescriptor` values to the handler registered for their kind.
///
/// A router always holds exactly one handler per [`ResourceKind`]; the
/// [`RouterBuilder`] refuses to build otherwise. Routing is stateless and takes
/// `&self`, so a router can be shared across threads and called concurrently.
/// Cloning is cheap: handlers are reference counted.
pub struct ResourceRouter<R> {
    file: Handler<FileSource, R>,
    database: Handler<DatabaseSource, R>,
}

impl<R: 'static> ResourceRouter<R> {
    /// Starts a router with no handlers registered.
    #[must_use]
    pub fn builder() -> RouterBuilder<R> {
        RouterBuilder::new()
    }

    /// Builds a router that forwards every kind to `handler`.
    #[must_use]
    pub fn from_handler<H>(handler: H) -> Self
    where
        H: ResourceHandler<Output = R>,
    {
        let handler = Arc::new(handler);
        let file_handler = Arc::clone(&handler);
        Self {
            file: Arc::new(move |source| file_handler.on_file(source)),
            database: Arc::new(move |source| handler.on_database(source)),
        }
    }

    /// Dispatches `descriptor` to its handler and returns the handler's result unchanged.
    ///
    /// Exactly one handler runs, exactly once, and it only sees the payload of
    /// its own variant.
    pub fn route(&self, descriptor: ResourceDescriptor) -> R {
        debug!(kind = descriptor.kind().as_str(), "dispatching descriptor");
        match descriptor {
            ResourceDescriptor::File(source) => (self.file)(source),
            ResourceDescriptor::Database(source) => (self.database)(source),
        }
    }

    /// Classifies a raw tagged descriptor and routes it.
    ///
    /// No handler runs unless classification succeeds.
    ///
    /// # Errors
    ///
    /// - `RouteError::UnknownVariant` if the tag names no known kind
    /// - `RouteError::MalformedDescriptor` if the tag is missing or the fields
    ///   do not match the tagged shape
    pub fn route_tagged(&self, raw: Json) -> Result<R, RouteError> {
        match classify(raw) {
            Ok(descriptor) => Ok(self.route(descriptor)),
            Err(err) => {
                warn!(error = %err, "rejected descriptor");
                Err(err)
            }
        }
    }
}

/// Returns `true` if `descriptor` carries `tag`.
///
/// Agrees with [`ResourceRouter::route`]: both discriminate through
/// [`ResourceDescriptor::kind`].
#[must_use]
pub fn is_variant(descriptor: &ResourceDescriptor, tag: &str) -> bool {
    descriptor.is_variant(tag)
}

impl<R> Clone for ResourceRouter<R> {
    fn clone(&self) -> Self {
        Self {
            file: Arc::clone(&self.file),
            database: Arc::clone(&self.database),
        }
    }
}

impl<R> fmt::Debug for ResourceRouter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRouter")
            .field("kinds", &ResourceKind::ALL)
            .finish_non_exhaustive()
    }
}

impl<R: 'static> Service<ResourceDescriptor> for ResourceRouter<R> {
    type Response = R;
    type Error = RouteError;
    type Future = Ready<Result<R, RouteError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, descriptor: ResourceDescriptor) -> Self::Future {
        ready(Ok(self.route(descriptor)))
    }
}

// ---------------------------------------------------------------------------
// RouterBuilder
// ---------------------------------------------------------------------------

/// Collects one handler per resource kind, then checks that none is missing.
pub struct RouterBuilder<R> {
    file: Option<Handler<FileSource, R>>,
    database: Option<Handler<DatabaseSource, R>>,
}

impl<R: 'static> RouterBuilder<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file: None,
            database: None,
        }
    }

    /// Registers the `"file"` handler, replacing any earlier one.
    #[must_use]
    pub fn on_file<F>(mut self, handler: F) -> Self
    where
        F: Fn(FileSource) -> R + Send + Sync + 'static,
    {
        self.file = Some(Arc::new(handler));
        self
    }

    /// Registers the `"db"` handler, replacing any earlier one.
    #[must_use]
    pub fn on_database<F>(mut self, handler: F) -> Self
    where
        F: Fn(DatabaseSource) -> R + Send + Sync + 'static,
    {
        self.database = Some(Arc::new(handler));
        self
    }

    /// Kinds that still lack a handler, in declaration order.
    #[must_use]
    pub fn missing(&self) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                ResourceKind::File => self.file.is_none(),
                ResourceKind::Database => self.database.is_none(),
            })
            .collect()
    }

    /// Finishes the router.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::MissingHandler` naming the first kind without a handler.
    pub fn build(self) -> Result<ResourceRouter<R>, RouteError> {
        let file = self.file.ok_or(RouteError::MissingHandler {
            kind: ResourceKind::File,
        })?;
        let database = self.database.ok_or(RouteError::MissingHandler {
            kind: ResourceKind::Database,
        })?;
        Ok(ResourceRouter { file, database })
    }
}

impl<R: 'static> Default for RouterBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
