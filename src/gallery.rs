//! The gallery owned by the view layer: view-state plus its store

use tracing::info;

use crate::config::GalleryConfig;
use crate::state::data::{PhotoDetail, PhotoItem, View};
use crate::state::store::{AnnotationStore, KeyValueStore};
use crate::state::uploads::{load_local_uploads, save_local_uploads};
use crate::state::view::CollectionViewState;

/// Pairs a [`CollectionViewState`] with the store that persists its
/// annotations and local uploads.
#[derive(Debug)]
pub struct Gallery<S: KeyValueStore> {
    state: CollectionViewState,
    store: S,
}

impl<S: KeyValueStore> Gallery<S> {
    /// Build a gallery, restoring local uploads from `store`
    pub fn open(config: &GalleryConfig, store: S) -> Self {
        let uploads = load_local_uploads(&store);
        info!("🖼️  Gallery opened with {} local uploads", uploads.len());
        let state = CollectionViewState::from_config(config).with_local_items(uploads);
        Self { state, store }
    }

    pub fn state(&self) -> &CollectionViewState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> View {
        self.state.view(&self.store)
    }

    pub fn detail(&self, id: &str) -> Option<PhotoDetail> {
        self.state.detail(id, &self.store)
    }

    // ========== Mutations ==========
    //
    // The view-state is only reachable through these, so every upload
    // goes through `add_local_item` and gets persisted.

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.state.set_query(query);
    }

    pub fn set_page(&mut self, n: usize) {
        self.state.set_page(n);
    }

    pub fn first_page(&mut self) {
        self.state.first_page();
    }

    pub fn previous_page(&mut self) {
        self.state.previous_page();
    }

    pub fn next_page(&mut self) {
        self.state.next_page();
    }

    pub fn last_page(&mut self) {
        self.state.last_page();
    }

    pub fn begin_fetch(&mut self) {
        self.state.begin_fetch();
    }

    pub fn replace_remote_items(&mut self, items: Vec<PhotoItem>) {
        self.state.replace_remote_items(items);
    }

    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.state.fail_fetch(message);
    }

    /// Append an upload and persist the updated uploads list.
    /// Returns `false` when an upload with the same id is already held.
    pub fn add_local_item(&mut self, item: PhotoItem) -> bool {
        let added = self.state.add_local_item(item);
        if added {
            save_local_uploads(&mut self.store, self.state.local_items());
        }
        added
    }

    pub fn annotation(&self, id: &str) -> Option<String> {
        self.store.annotation(id)
    }

    pub fn save_annotation(&mut self, id: &str, text: &str) {
        self.store.set_annotation(id, text);
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;
    use crate::state::uploads::LOCAL_UPLOADS_KEY;

    fn config(page_size: usize) -> GalleryConfig {
        GalleryConfig {
            page_size,
            ..GalleryConfig::default()
        }
    }

    #[test]
    fn test_uploads_are_persisted_and_restored() {
        let mut gallery = Gallery::open(&config(4), MemoryStore::new());
        gallery.add_local_item(PhotoItem::local("holiday", "data:image/jpeg;base64,AA"));

        let store = gallery.into_store();
        assert!(store.get(LOCAL_UPLOADS_KEY).is_some());

        let reopened = Gallery::open(&config(4), store);
        assert_eq!(reopened.state().local_items().len(), 1);
        assert_eq!(reopened.view().items[0].photo.description, "holiday");
    }

    #[test]
    fn test_every_upload_survives_reopening() {
        let mut gallery = Gallery::open(&config(2), MemoryStore::new());
        gallery.replace_remote_items(vec![PhotoItem {
            id: "1".into(),
            description: "remote".into(),
            thumbnail_url: "t".into(),
            full_url: "f".into(),
            album_id: 1,
        }]);
        gallery.set_query("trip");
        for n in 0..3 {
            assert!(gallery.add_local_item(PhotoItem::local(format!("trip {n}"), "data:,")));
        }
        gallery.last_page();
        assert_eq!(gallery.view().label(), "Page 2 of 2");

        let reopened = Gallery::open(&config(2), gallery.into_store());
        let titles: Vec<&str> = reopened
            .state()
            .local_items()
            .iter()
            .map(|item| item.description.as_str())
            .collect();
        assert_eq!(titles, ["trip 0", "trip 1", "trip 2"]);
    }

    #[test]
    fn test_duplicate_upload_is_not_persisted_twice() {
        let mut gallery = Gallery::open(&config(4), MemoryStore::new());
        let upload = PhotoItem::local("once", "data:,");
        assert!(gallery.add_local_item(upload.clone()));
        assert!(!gallery.add_local_item(upload));

        let reopened = Gallery::open(&config(4), gallery.into_store());
        assert_eq!(reopened.state().local_items().len(), 1);
    }

    #[test]
    fn test_malformed_uploads_open_as_empty() {
        let mut store = MemoryStore::new();
        store.set(LOCAL_UPLOADS_KEY, "[{broken");
        let gallery = Gallery::open(&config(4), store);
        assert!(gallery.state().local_items().is_empty());
    }

    #[test]
    fn test_saved_annotation_shows_in_view_and_detail() {
        let mut gallery = Gallery::open(&config(4), MemoryStore::new());
        let upload = PhotoItem::local("kitchen", "data:,");
        let id = upload.id.clone();
        gallery.add_local_item(upload);

        gallery.save_annotation(&id, "new tiles");
        assert_eq!(gallery.annotation(&id).as_deref(), Some("new tiles"));
        assert_eq!(gallery.view().items[0].annotation.as_deref(), Some("new tiles"));
        assert_eq!(
            gallery.detail(&id).unwrap().photo.annotation.as_deref(),
            Some("new tiles")
        );
    }
}
