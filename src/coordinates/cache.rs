//! Process-wide canonical instance stores for both coordinate variants
//!
//! Each distinct normalized value tuple maps to exactly one shared instance.
//! Entries are never replaced and never evicted: memory grows with the number of
//! distinct coordinates ever requested.

use std::sync::Arc;

use dashmap::DashMap;
use lazy_static::lazy_static;

use super::cartesian::CartesianCoordinate;
use super::spherical::SphericCoordinate;
use crate::numeric::normalized_key;

/// Normalized bit patterns of the three components of a coordinate
pub type CacheKey = [u64; 3];

/// Builds the cache key for a component triple
pub fn cache_key(a: f64, b: f64, c: f64) -> CacheKey {
    [normalized_key(a), normalized_key(b), normalized_key(c)]
}

lazy_static! {
    static ref CARTESIAN_CACHE: CoordinateCache<CartesianCoordinate> = CoordinateCache::new();
    static ref SPHERIC_CACHE: CoordinateCache<SphericCoordinate> = CoordinateCache::new();
}

/// Cache holding every canonical `CartesianCoordinate`
pub(crate) fn cartesian_cache() -> &'static CoordinateCache<CartesianCoordinate> {
    &CARTESIAN_CACHE
}

/// Cache holding every canonical `SphericCoordinate`
pub(crate) fn spheric_cache() -> &'static CoordinateCache<SphericCoordinate> {
    &SPHERIC_CACHE
}

/// Concurrent insert-once map from normalized values to shared instances
#[derive(Debug)]
pub struct CoordinateCache<T> {
    entries: DashMap<CacheKey, Arc<T>>,
}

impl<T> CoordinateCache<T> {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Looks up the canonical instance for `key`
    pub fn get(&self, key: &CacheKey) -> Option<Arc<T>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the canonical instance for `key`, creating it on a miss
    ///
    /// The shard holding `key` stays write-locked between the lookup and the
    /// insert, so concurrent callers racing on one key all receive the instance
    /// published by the first of them.
    pub fn get_or_insert_with<F>(&self, key: CacheKey, create: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get(&key) {
            return existing;
        }

        let entry = self.entries.entry(key).or_insert_with(|| {
            log::trace!("interning new coordinate for key {:x?}", key);
            Arc::new(create())
        });
        Arc::clone(entry.value())
    }

    /// Returns the number of canonical instances
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no instance has been created yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for CoordinateCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of canonical Cartesian coordinates
    pub cartesian: usize,
    /// Number of canonical spherical coordinates
    pub spherical: usize,
}

/// Returns the current sizes of both process-wide caches
pub fn cache_stats() -> CacheStats {
    CacheStats {
        cartesian: CARTESIAN_CACHE.len(),
        spherical: SPHERIC_CACHE.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_cache_basic() {
        let cache: CoordinateCache<(f64, f64, f64)> = CoordinateCache::new();
        assert!(cache.is_empty());

        let key = cache_key(1.0, 2.0, 3.0);
        let first = cache.get_or_insert_with(key, || (1.0, 2.0, 3.0));

        assert_eq!(cache.len(), 1);
        assert!(Arc::ptr_eq(&first, &cache.get(&key).unwrap()));
    }

    #[test]
    fn test_first_writer_wins() {
        let cache: CoordinateCache<(f64, f64, f64)> = CoordinateCache::new();

        let first = cache.get_or_insert_with(cache_key(1.1, 2.2, 3.3), || (1.1, 2.2, 3.3));
        let second = cache.get_or_insert_with(cache_key(6.6 - 5.5, 22.0 / 10.0, 1.1 * 3.0), || {
            (6.6 - 5.5, 22.0 / 10.0, 1.1 * 3.0)
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, (1.1, 2.2, 3.3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_signed_zero_keys_collide() {
        assert_eq!(cache_key(0.0, -0.0, 0.0), cache_key(-0.0, 0.0, -0.0));
    }

    #[test]
    fn test_cache_concurrent_access() {
        let cache: Arc<CoordinateCache<usize>> = Arc::new(CoordinateCache::new());

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let cache_clone = Arc::clone(&cache);
                thread::spawn(move || {
                    (0..100)
                        .map(|j| {
                            let key = cache_key(j as f64, 0.0, 0.0);
                            cache_clone.get_or_insert_with(key, || i)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<Arc<usize>>> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.len(), 100);
        for per_thread in &results {
            for (j, instance) in per_thread.iter().enumerate() {
                assert!(Arc::ptr_eq(instance, &results[0][j]));
            }
        }
    }
}
