// ABOUTME: Bounded LRU cache of parsed workout exports keyed by canonical path
// ABOUTME: A changed modification time counts as a miss; reload and invalidation are explicit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::CsvWorkoutLoader;
use liftlog_core::constants::ingestion::DEFAULT_CACHE_CAPACITY;
use liftlog_core::errors::{AppError, AppResult};
use liftlog_core::models::WorkoutSet;
use lru::LruCache;
use std::fs;
use std::io::ErrorKind;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// Parsed export with the modification time it was read at
#[derive(Debug, Clone)]
struct CachedExport {
    modified: Option<SystemTime>,
    sets: Arc<Vec<WorkoutSet>>,
}

/// Explicit cache of loaded workout exports
///
/// Nothing is memoized implicitly: callers own the cache and decide when to
/// reload or invalidate.
#[derive(Debug)]
pub struct WorkoutDataCache {
    loader: CsvWorkoutLoader,
    store: LruCache<PathBuf, CachedExport>,
}

impl WorkoutDataCache {
    /// Fallback capacity when zero is requested
    const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_CACHE_CAPACITY) {
        Some(n) => n,
        None => NonZeroUsize::MIN,
    };

    /// Cache holding up to `capacity` exports
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_loader(capacity, CsvWorkoutLoader::default())
    }

    /// Cache using a custom loader
    #[must_use]
    pub fn with_loader(capacity: usize, loader: CsvWorkoutLoader) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(Self::FALLBACK_CAPACITY);
        Self {
            loader,
            store: LruCache::new(capacity),
        }
    }

    fn resolve(path: &Path) -> AppResult<(PathBuf, Option<SystemTime>)> {
        let canonical = fs::canonicalize(path).map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                AppError::not_found(format!("workout export {}", path.display()))
            } else {
                AppError::from(error)
            }
        })?;
        let modified = fs::metadata(&canonical)?.modified().ok();
        Ok((canonical, modified))
    }

    /// Sets of an export, read from disk only on a miss or when the file changed
    ///
    /// # Errors
    ///
    /// Returns an error if the export is missing or cannot be parsed
    pub fn get_or_load(&mut self, path: &Path) -> AppResult<Arc<Vec<WorkoutSet>>> {
        let (canonical, modified) = Self::resolve(path)?;
        if let Some(entry) = self.store.get(&canonical) {
            if entry.modified == modified {
                debug!(path = %canonical.display(), "workout export cache hit");
                return Ok(Arc::clone(&entry.sets));
            }
            debug!(path = %canonical.display(), "workout export changed on disk");
        }
        self.load_into_cache(canonical, modified)
    }

    /// Read an export from disk regardless of cached state
    ///
    /// # Errors
    ///
    /// Returns an error if the export is missing or cannot be parsed
    pub fn reload(&mut self, path: &Path) -> AppResult<Arc<Vec<WorkoutSet>>> {
        let (canonical, modified) = Self::resolve(path)?;
        info!(path = %canonical.display(), "reloading workout export");
        self.load_into_cache(canonical, modified)
    }

    fn load_into_cache(
        &mut self,
        canonical: PathBuf,
        modified: Option<SystemTime>,
    ) -> AppResult<Arc<Vec<WorkoutSet>>> {
        let sets = Arc::new(self.loader.load_path(&canonical)?);
        self.store.put(
            canonical,
            CachedExport {
                modified,
                sets: Arc::clone(&sets),
            },
        );
        Ok(sets)
    }

    /// Drop one export; returns whether it was cached
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let key = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.store.pop(&key).is_some()
    }

    /// Drop every cached export
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Number of cached exports
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether nothing is cached
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

impl Default for WorkoutDataCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
