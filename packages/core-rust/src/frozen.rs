//! Read-only sequences fixed at construction.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// An immutable sequence.
///
/// Built once from a `Vec` or iterator and exposed only as a shared slice.
/// There is no `push`, `insert`, or `&mut` access; clones share storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrozenList<T>(Arc<[T]>);

impl<T> FrozenList<T> {
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }
}

impl<T: Serialize> Serialize for FrozenList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl<T> Deref for FrozenList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T> From<Vec<T>> for FrozenList<T> {
    fn from(items: Vec<T>) -> Self {
        Self(items.into())
    }
}

impl<T, const N: usize> From<[T; N]> for FrozenList<T> {
    fn from(items: [T; N]) -> Self {
        Self(Arc::from(Vec::from(items)))
    }
}

impl<T> FromIterator<T> for FrozenList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a FrozenList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_like_a_slice() {
        let roles = FrozenList::from(["admin", "guest", "editor"]);
        assert_eq!(roles.len(), 3);
        assert_eq!(roles.first(), Some(&"admin"));
        assert_eq!(roles[2], "editor");
        assert!(roles.contains(&"guest"));
    }

    #[test]
    fn clones_share_storage() {
        let roles: FrozenList<String> = vec!["admin".to_string()].into();
        let copy = roles.clone();
        assert!(std::ptr::eq(roles.as_slice(), copy.as_slice()));
    }

    #[test]
    fn owned_copy_is_detached() {
        let roles = FrozenList::from([1, 2, 3]);
        let mut owned = roles.to_vec();
        owned.push(4);
        assert_eq!(roles.len(), 3);
        assert_eq!(owned.len(), 4);
    }

    #[test]
    fn serializes_as_array() {
        let roles = FrozenList::from(["admin", "guest"]);
        assert_eq!(
            serde_json::to_string(&roles).unwrap(),
            r#"["admin","guest"]"#
        );
    }
}
