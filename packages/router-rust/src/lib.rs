//! `SourceGate` Router — tag-directed resource dispatch and constrained stores.

pub mod config;
pub mod service;
pub mod storage;
pub mod telemetry;

pub use config::{AppConfig, LogConfig, LogFormat};
pub use service::{
    build_route_pipeline, classify, is_variant, ResourceHandler, ResourceRouter, RouteError,
    RouterBuilder,
};
pub use storage::{ConstrainedStore, StorageEngine, StoreConfig, StoreError};
