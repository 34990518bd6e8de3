//! # In-Memory Store
//!
//! Shared state backing the sample resources. Handlers capture clones of a
//! [`Store`]; all clones see the same map.

use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A cloneable, async-locked map.
#[derive(Debug)]
pub struct Store<K, V> {
    inner: Arc<RwLock<BTreeMap<K, V>>>,
}

impl<K, V> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for Store<K, V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<K: Ord, V: Clone> Store<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.read().await.get(key).cloned()
    }

    /// Inserts or replaces, returning the previous value.
    pub async fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.write().await.insert(key, value)
    }

    pub async fn remove(&self, key: &K) -> Option<V> {
        self.inner.write().await.remove(key)
    }

    /// Applies `f` to the stored value under the write lock.
    ///
    /// Returns `None` if the key is absent.
    pub async fn update<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.inner.write().await.get_mut(key).map(f)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clones_share_state() {
        let store: Store<u64, String> = Store::new();
        let other = store.clone();
        assert_eq!(store.put(1, "a".into()).await, None);
        assert_eq!(other.get(&1).await.as_deref(), Some("a"));

        let len = other.update(&1, |v| {
            v.push('b');
            v.len()
        });
        assert_eq!(len.await, Some(2));
        assert_eq!(store.remove(&1).await.as_deref(), Some("ab"));
        assert!(store.is_empty().await);
    }
}
