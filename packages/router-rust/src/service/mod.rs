//! Resource routing framework.
//!
//! This module implements the descriptor dispatch pipeline:
//!
//! 1. **Classification** (`classify`): raw JSON -> `Result<ResourceDescriptor, RouteError>`
//! 2. **Middleware** (`middleware`): Tower layers (classification, metrics)
//! 3. **Routing** (`router`): Exhaustive dispatch to one handler per resource kind

pub mod classify;
pub mod error;
pub mod middleware;
pub mod router;

pub use classify::{classify, classify_kind};
pub use error::RouteError;
pub use middleware::build_route_pipeline;
pub use router::{is_variant, ResourceHandler, ResourceRouter, RouterBuilder};
