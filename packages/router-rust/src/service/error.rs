use sourcegate_core::{DescriptorError, ResourceKind};

/// Errors returned by resource routing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("unknown resource variant: {tag}")]
    UnknownVariant { tag: String },
    #[error("malformed descriptor: {reason}")]
    MalformedDescriptor { reason: String },
    #[error("no handler registered for resource kind: {kind}")]
    MissingHandler { kind: ResourceKind },
}

impl From<DescriptorError> for RouteError {
    fn from(err: DescriptorError) -> Self {
        match err {
            DescriptorError::UnknownVariant { tag } => RouteError::UnknownVariant { tag },
            DescriptorError::Malformed { reason } => RouteError::MalformedDescriptor { reason },
        }
    }
}
