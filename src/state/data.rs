//! Shared data structures for the gallery state
//!
//! These structs represent the data model that flows between
//! the persistence layer, the view-state and the rendering layer.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Disambiguates uploads created within the same millisecond. Restarts at 0
/// with each process, so ids are only unique while the clock moves forward;
/// `CollectionViewState::add_local_item` drops an upload whose id is taken.
static LOCAL_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A single photo, normalized from whatever source delivered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoItem {
    /// Stable identifier, unique within a session
    pub id: String,
    /// Display title, the text the search filter matches against
    pub description: String,
    pub thumbnail_url: String,
    pub full_url: String,
    /// Album the photo belongs to (0 for local uploads)
    pub album_id: i64,
}

impl PhotoItem {
    /// Build a locally uploaded photo from an encoded image URL
    /// (typically a `data:` URL produced by the upload collaborator).
    pub fn local(description: impl Into<String>, image_url: impl Into<String>) -> Self {
        let image_url = image_url.into();
        Self {
            id: format!(
                "local-{}-{}",
                Utc::now().timestamp_millis(),
                LOCAL_SEQUENCE.fetch_add(1, Ordering::Relaxed)
            ),
            description: description.into(),
            thumbnail_url: image_url.clone(),
            full_url: image_url,
            album_id: 0,
        }
    }

    pub fn is_local(&self) -> bool {
        self.id.starts_with("local-")
    }
}

/// A photo joined with its persisted annotation, ready to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedPhoto {
    pub photo: PhotoItem,
    pub annotation: Option<String>,
}

/// Where the remote collection is in its fetch lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// The visible page of filtered photos plus pagination metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub items: Vec<AnnotatedPhoto>,
    /// 1-based
    pub page_index: usize,
    /// Never 0, even for an empty result
    pub total_pages: usize,
    pub total_count: usize,
    pub status: FetchStatus,
}

impl View {
    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pagination label, e.g. "Page 2 of 5"
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.page_index, self.total_pages)
    }
}

/// Everything the detail page shows for one photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetail {
    pub photo: AnnotatedPhoto,
    pub previous_id: Option<String>,
    pub next_id: Option<String>,
    /// Up to a few other photos from the same album
    pub related: Vec<PhotoItem>,
}
