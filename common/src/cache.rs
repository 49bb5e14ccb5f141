//! Keyed query cache shared across requests.
//!
//! Entries expire after a TTL and are dropped eagerly when a write
//! invalidates their key name. Failed loads are never cached.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::Result;

/// `name` groups related entries (`projects`, `project`); `arg` is the id
/// the query was parameterised with, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub name: &'static str,
    pub arg: Option<String>,
}

impl QueryKey {
    pub fn new(name: &'static str) -> Self {
        Self { name, arg: None }
    }

    pub fn with_arg(name: &'static str, arg: impl Into<String>) -> Self {
        Self {
            name,
            arg: Some(arg.into()),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arg {
            Some(arg) => write!(f, "{}/{arg}", self.name),
            None => f.write_str(self.name),
        }
    }
}

type Entry = (Instant, Arc<dyn Any + Send + Sync>);

#[derive(Clone)]
pub struct QueryCache {
    entries: Arc<Mutex<HashMap<QueryKey, Entry>>>,
    ttl: Duration,
}

impl fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serve `key` from the cache, or run `load` and cache its result.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.get::<T>(&key) {
            debug!("cache hit: {key}");
            return Ok(hit);
        }

        debug!("cache miss: {key}");
        self.reload(key, load).await
    }

    /// Run `load` even when `key` is cached and store the result under
    /// `key` alone. A failed load leaves the existing entry in place.
    pub async fn reload<T, F, Fut>(&self, key: QueryKey, load: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let value = load().await?;
        self.guard()
            .insert(key, (Instant::now(), Arc::new(value.clone())));
        Ok(value)
    }

    /// A fresh entry of type `T`; stale entries are evicted on the way.
    pub fn get<T: Clone + 'static>(&self, key: &QueryKey) -> Option<T> {
        let mut entries = self.guard();
        let (stored_at, value) = entries.get(key)?;
        if stored_at.elapsed() >= self.ttl {
            entries.remove(key);
            return None;
        }
        value.downcast_ref::<T>().cloned()
    }

    /// Drop every entry whose key name is `name`.
    pub fn invalidate(&self, name: &str) {
        let mut entries = self.guard();
        let before = entries.len();
        entries.retain(|key, _| key.name != name);
        debug!("invalidated {} entr(ies) for {name}", before - entries.len());
    }

    pub fn invalidate_key(&self, key: &QueryKey) {
        self.guard().remove(key);
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn test_second_fetch_is_a_hit() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryKey::new("services");
        let first = cache.fetch(key.clone(), || async { Ok(vec![1, 2]) }).await.unwrap();
        let second = cache
            .fetch(key, || async { Err::<Vec<i32>, _>(Error::Backend("not called".into())) })
            .await
            .unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_errors_are_not_cached() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryKey::with_arg("project", "p1");
        let err = cache
            .fetch(key.clone(), || async { Err::<u8, _>(Error::not_found("projects")) })
            .await;
        assert!(err.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.fetch(key, || async { Ok(5u8) }).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_invalidate_by_name() {
        let cache = QueryCache::new(Duration::from_secs(60));
        cache.fetch(QueryKey::new("projects"), || async { Ok(1u8) }).await.unwrap();
        cache
            .fetch(QueryKey::with_arg("projects", "s1"), || async { Ok(2u8) })
            .await
            .unwrap();
        cache
            .fetch(QueryKey::with_arg("service", "s1"), || async { Ok(3u8) })
            .await
            .unwrap();
        cache.invalidate("projects");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get::<u8>(&QueryKey::with_arg("service", "s1")), Some(3));
    }

    #[test]
    fn test_expired_entries_are_evicted() {
        let cache = QueryCache::new(Duration::ZERO);
        cache
            .guard()
            .insert(QueryKey::new("services"), (Instant::now(), Arc::new(1u8)));
        assert_eq!(cache.get::<u8>(&QueryKey::new("services")), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(QueryKey::with_arg("project", "42").to_string(), "project/42");
        assert_eq!(QueryKey::new("partners").to_string(), "partners");
    }

    #[tokio::test]
    async fn test_reload_replaces_only_its_key() {
        let cache = QueryCache::new(Duration::from_secs(60));
        let services = QueryKey::new("services");
        let projects = QueryKey::new("projects");
        cache.fetch(services.clone(), || async { Ok(vec![1]) }).await.unwrap();
        cache.fetch(projects.clone(), || async { Ok(vec![7]) }).await.unwrap();

        let fresh = cache.reload(services.clone(), || async { Ok(vec![1, 2]) }).await.unwrap();
        assert_eq!(fresh, vec![1, 2]);
        assert_eq!(cache.get::<Vec<i32>>(&services), Some(vec![1, 2]));
        assert_eq!(cache.get::<Vec<i32>>(&projects), Some(vec![7]));

        let failed = cache
            .reload(services.clone(), || async { Err::<Vec<i32>, _>(Error::Backend("down".into())) })
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.get::<Vec<i32>>(&services), Some(vec![1, 2]));
    }
}
