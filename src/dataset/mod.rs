//! Dataset providers: where posts come from.
//!
//! The filter engine only needs a `Vec<Post>`. This module puts a seam
//! between it and the archive on disk:
//!
//! - [`DatasetProvider`] - anything that can produce posts
//! - [`CsvDataset`] - reads a CSV archive (requires `csv` feature)
//! - [`InMemoryDataset`] - a fixed set of posts, handy in tests
//! - [`CachedDataset`] - loads once, serves the same posts until reloaded
//!
//! # Example
//!
//! ```rust
//! use postsift::dataset::{CachedDataset, DatasetProvider, InMemoryDataset};
//! use postsift::Post;
//!
//! # fn main() -> postsift::Result<()> {
//! let cache = CachedDataset::new(InMemoryDataset::new(vec![Post::new("Hola")]));
//!
//! let first = cache.get()?;
//! let second = cache.get()?;
//! assert!(std::sync::Arc::ptr_eq(&first, &second));
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "csv")]
mod csv_source;
mod timestamp;

#[cfg(feature = "csv")]
pub use csv_source::CsvDataset;
pub use timestamp::parse_timestamp;

use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info};

use crate::Post;
use crate::error::Result;

/// Source of posts for the filter engine.
pub trait DatasetProvider: Send + Sync {
    /// Short human-readable name (e.g., "CSV").
    fn name(&self) -> &'static str;

    /// Loads every post of the dataset.
    ///
    /// # Errors
    ///
    /// Returns a [`PostsiftError`](crate::PostsiftError) if the source can't
    /// be read or is malformed.
    fn load(&self) -> Result<Vec<Post>>;
}

/// A provider over posts that are already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataset {
    posts: Vec<Post>,
}

impl InMemoryDataset {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }
}

impl DatasetProvider for InMemoryDataset {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<Vec<Post>> {
        Ok(self.posts.clone())
    }
}

/// Load-once wrapper around a [`DatasetProvider`].
///
/// The first [`get`](Self::get) loads the dataset; later calls share the
/// same `Arc`. [`reload`](Self::reload) replaces the cached posts and
/// [`invalidate`](Self::invalidate) drops them so the next `get` loads again.
/// Safe to share between threads.
pub struct CachedDataset<P: DatasetProvider> {
    provider: P,
    cache: RwLock<Option<Arc<[Post]>>>,
}

impl<P: DatasetProvider> CachedDataset<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            cache: RwLock::new(None),
        }
    }

    /// Returns the cached posts, loading them on first use.
    pub fn get(&self) -> Result<Arc<[Post]>> {
        if let Some(posts) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(posts));
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have loaded while we waited for the lock
        if let Some(posts) = cache.as_ref() {
            return Ok(Arc::clone(posts));
        }

        let posts = self.load_from_provider()?;
        *cache = Some(Arc::clone(&posts));
        Ok(posts)
    }

    /// Loads the dataset again and replaces the cache.
    ///
    /// On error the previous cache is kept.
    pub fn reload(&self) -> Result<Arc<[Post]>> {
        let posts = self.load_from_provider()?;
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&posts));
        Ok(posts)
    }

    /// Drops the cached posts.
    pub fn invalidate(&self) {
        debug!("Invalidating {} dataset cache", self.provider.name());
        *self.cache.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns `true` if posts are currently cached.
    pub fn is_loaded(&self) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn load_from_provider(&self) -> Result<Arc<[Post]>> {
        let posts = self.provider.load()?;
        info!("Loaded {} posts from {} dataset", posts.len(), self.provider.name());
        Ok(posts.into())
    }
}
