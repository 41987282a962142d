/// Limits applied by a [`ConstrainedStore`](super::ConstrainedStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of distinct keys. `None` means unbounded.
    /// Overwriting an existing key is always allowed.
    pub max_entries: Option<usize>,
}

impl StoreConfig {
    /// Unbounded configuration.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Configuration that caps the store at `max_entries` keys.
    #[must_use]
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_config_defaults() {
        let config = StoreConfig::default();
        assert!(config.max_entries.is_none());
        assert_eq!(config, StoreConfig::unbounded());
    }

    #[test]
    fn bounded_sets_limit() {
        assert_eq!(StoreConfig::bounded(16).max_entries, Some(16));
    }
}
