//! Photo library feeding the photo particles.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Placeholder photos shown before the user adds their own.
pub const DEFAULT_PHOTOS: [&str; 5] = [
    "https://picsum.photos/id/1011/400/400",
    "https://picsum.photos/id/1015/400/400",
    "https://picsum.photos/id/1016/400/400",
    "https://picsum.photos/id/1018/400/400",
    "https://picsum.photos/id/1025/400/400",
];

/// Opaque reference to an image (path or URL). Loading is the renderer's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PhotoRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PhotoRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ordered photo list, newest first, capped at `cap` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoLibrary {
    photos: Vec<PhotoRef>,
    cap: usize,
}

impl PhotoLibrary {
    pub fn new(cap: usize) -> Self {
        Self {
            photos: Vec::new(),
            cap,
        }
    }

    /// Library seeded with [`DEFAULT_PHOTOS`].
    pub fn with_defaults(cap: usize) -> Self {
        let mut library = Self::new(cap);
        library.photos = DEFAULT_PHOTOS.iter().map(|p| PhotoRef::from(*p)).take(cap).collect();
        library
    }

    /// Prepend `photos` (keeping their order) and truncate to the cap.
    ///
    /// Returns how many entries were dropped off the end.
    pub fn add_photos<I>(&mut self, photos: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<PhotoRef>,
    {
        let mut merged: Vec<PhotoRef> = photos.into_iter().map(Into::into).collect();
        let added = merged.len();
        merged.append(&mut self.photos);

        let dropped = merged.len().saturating_sub(self.cap);
        merged.truncate(self.cap);
        self.photos = merged;

        info!("Added {} photos ({} total, {} dropped)", added, self.photos.len(), dropped);
        dropped
    }

    /// Photo shown on photo slot `slot`; slots wrap around the library.
    pub fn photo_for_slot(&self, slot: usize) -> Option<(usize, &PhotoRef)> {
        if self.photos.is_empty() {
            debug!("No photos for slot {}", slot);
            return None;
        }
        let index = slot % self.photos.len();
        Some((index, &self.photos[index]))
    }

    pub fn photos(&self) -> &[PhotoRef] {
        &self.photos
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}
