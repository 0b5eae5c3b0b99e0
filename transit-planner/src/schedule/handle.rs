//! Swappable timetable snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use super::error::ScheduleError;
use super::timetable::Timetable;

/// Thread-safe access to the current timetable.
///
/// Planning takes a snapshot (`Arc<Timetable>`) and never holds the lock
/// during a search. A reload builds the replacement first and only then
/// swaps it in, so in-flight searches keep the timetable they started with.
#[derive(Clone)]
pub struct ScheduleHandle {
    inner: Arc<RwLock<Arc<Timetable>>>,
    source: Option<PathBuf>,
}

impl ScheduleHandle {
    /// Wrap an already-built timetable that has no backing file.
    pub fn new(timetable: Timetable) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(timetable))),
            source: None,
        }
    }

    /// Load the timetable from a schedule file, remembering the path for
    /// later reloads.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        let path = path.as_ref().to_path_buf();
        let timetable = Timetable::load(&path)?;
        Ok(Self {
            inner: Arc::new(RwLock::new(Arc::new(timetable))),
            source: Some(path),
        })
    }

    /// Returns the schedule file path, if there is one.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Get the current timetable.
    pub async fn snapshot(&self) -> Arc<Timetable> {
        let guard = self.inner.read().await;
        guard.clone()
    }

    /// Replace the current timetable.
    pub async fn replace(&self, timetable: Timetable) {
        let mut guard = self.inner.write().await;
        *guard = Arc::new(timetable);
    }

    /// Rebuild the timetable from the schedule file.
    ///
    /// Parsing runs on the blocking pool. On success, swaps in the new
    /// timetable and returns it. On failure, the current timetable is
    /// preserved and the error is returned. Handles without a backing file
    /// return their current timetable.
    pub async fn reload(&self) -> Result<Arc<Timetable>, ScheduleError> {
        let Some(path) = self.source.clone() else {
            return Ok(self.snapshot().await);
        };
        let timetable = tokio::task::spawn_blocking(move || Timetable::load(path)).await??;
        let timetable = Arc::new(timetable);
        let mut guard = self.inner.write().await;
        *guard = Arc::clone(&timetable);
        Ok(timetable)
    }
}
