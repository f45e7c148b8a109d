//! Persisted favorite courses.
//!
//! The store is an explicit, injected service with a typed read *and* write
//! API; view code never reaches into ambient storage directly. The on-disk
//! format is a plain JSON array of courses under one namespaced file — no
//! version field, no migration path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::model::Course;

/// File name under the platform data directory.
const FAVORITES_FILE: &str = "coursefiles/favorites.json";

/// Errors reading or writing the favorites file.
#[derive(Debug, Error)]
pub enum FavoritesError {
    /// I/O error touching the favorites file.
    #[error("favorites file {path}: {source}")]
    Io {
        /// The file path involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The favorites file exists but is not a JSON array of courses.
    #[error("favorites file {path} is corrupt: {source}")]
    Corrupt {
        /// The file path involved.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// Data-access contract for the favorites list.
///
/// Favorites keep insertion order; adds are idempotent on `course_id`.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Returns all favorite courses in insertion order.
    async fn list(&self) -> Result<Vec<Course>, FavoritesError>;

    /// Adds a course; a second add of the same `course_id` is a no-op.
    async fn add(&self, course: Course) -> Result<(), FavoritesError>;

    /// Removes a course by id. Removing an absent id is a no-op.
    async fn remove(&self, course_id: &str) -> Result<(), FavoritesError>;

    /// Whether a course id is currently a favorite.
    async fn contains(&self, course_id: &str) -> Result<bool, FavoritesError>;
}

/// JSON-array file store, the production implementation.
#[derive(Debug, Clone)]
pub struct JsonFileFavorites {
    path: PathBuf,
}

impl JsonFileFavorites {
    /// Creates a store backed by an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the platform default location
    /// (`<data dir>/coursefiles/favorites.json`), falling back to the
    /// current directory when no data dir exists.
    #[must_use]
    pub fn at_default_location() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(FAVORITES_FILE))
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Course>, FavoritesError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            // A missing file is an empty favorites list, not an error.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no favorites file yet");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(FavoritesError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| FavoritesError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    #[instrument(skip(self, favorites), fields(count = favorites.len()))]
    async fn save(&self, favorites: &[Course]) -> Result<(), FavoritesError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FavoritesError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        let raw = serde_json::to_string_pretty(favorites).map_err(|source| {
            FavoritesError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|source| FavoritesError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl FavoritesStore for JsonFileFavorites {
    async fn list(&self) -> Result<Vec<Course>, FavoritesError> {
        self.load().await
    }

    async fn add(&self, course: Course) -> Result<(), FavoritesError> {
        let mut favorites = self.load().await?;
        if favorites.iter().any(|c| c.course_id == course.course_id) {
            warn!(course_id = %course.course_id, "already a favorite");
            return Ok(());
        }
        favorites.push(course);
        self.save(&favorites).await
    }

    async fn remove(&self, course_id: &str) -> Result<(), FavoritesError> {
        let mut favorites = self.load().await?;
        let before = favorites.len();
        favorites.retain(|c| c.course_id != course_id);
        if favorites.len() == before {
            return Ok(());
        }
        self.save(&favorites).await
    }

    async fn contains(&self, course_id: &str) -> Result<bool, FavoritesError> {
        Ok(self
            .load()
            .await?
            .iter()
            .any(|c| c.course_id == course_id))
    }
}
