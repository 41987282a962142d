//! `SourceGate` Core — resource descriptors, bounded values, and merge utilities.

pub mod access;
pub mod bound;
pub mod descriptor;
pub mod frozen;
pub mod measure;
pub mod merge;
pub mod types;

pub use access::{Access, AccessStatus};
pub use bound::BoundValue;
pub use descriptor::{
    DatabaseSource, DescriptorError, FileSource, NonEmptyString, ResourceDescriptor, ResourceKind,
};
pub use frozen::FrozenList;
pub use measure::{item_count, measure, word_count, Measurable, Measurement};
pub use merge::{merge, merge_objects, pair, Combinable, CombinedRecord, MergeError};
pub use types::{Flag, Value};
