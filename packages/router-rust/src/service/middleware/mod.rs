//! Tower middleware layers for the routing pipeline.
//!
//! - [`classify`]: Raw JSON to typed descriptor conversion
//! - [`metrics`]: Dispatch timing and outcome via `tracing` spans
//! - [`pipeline`]: Composes all layers into a single service stack

pub mod classify;
pub mod metrics;
pub mod pipeline;

pub use classify::ClassifyLayer;
pub use metrics::MetricsLayer;
pub use pipeline::build_route_pipeline;
