//! View-state core for a searchable, paginated photo gallery.
//!
//! The rendering layer owns a [`Gallery`], feeds it remote photos through
//! [`CollectionViewState::replace_remote_items`] and renders whatever
//! [`Gallery::view`] returns.

pub mod config;
pub mod error;
pub mod gallery;
pub mod source;
pub mod state;

pub use config::{GalleryConfig, QueryPagePolicy};
pub use error::{GalleryError, Result};
pub use gallery::Gallery;
pub use state::data::{AnnotatedPhoto, FetchStatus, PhotoDetail, PhotoItem, View};
pub use state::library::Library;
pub use state::store::{AnnotationStore, KeyValueStore, MemoryStore};
pub use state::view::CollectionViewState;
