//! Collection view-state: filtering, pagination and annotation merge
//!
//! The state owns the remote photo list, the locally uploaded photos and
//! the current query/page. Every mutation re-establishes the page invariant
//! `1 <= page_index <= total_pages`, so [`CollectionViewState::view`] never
//! has to correct anything and stays a pure read.

use tracing::{debug, info, warn};

use super::data::{AnnotatedPhoto, FetchStatus, PhotoDetail, PhotoItem, View};
use super::filter;
use super::store::AnnotationStore;
use crate::config::{GalleryConfig, QueryPagePolicy, DEFAULT_PAGE_SIZE};

/// Most related photos shown on a detail page
pub const RELATED_LIMIT: usize = 3;

#[derive(Debug, Clone)]
pub struct CollectionViewState {
    remote: Vec<PhotoItem>,
    local: Vec<PhotoItem>,
    query: String,
    /// Cached `filter::normalize(query)`
    needle: String,
    page_index: usize,
    page_size: usize,
    query_policy: QueryPagePolicy,
    jump_to_new_item: bool,
    status: FetchStatus,
}

impl Default for CollectionViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CollectionViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            remote: Vec::new(),
            local: Vec::new(),
            query: String::new(),
            needle: String::new(),
            page_index: 1,
            page_size: page_size.max(1),
            query_policy: QueryPagePolicy::default(),
            jump_to_new_item: true,
            status: FetchStatus::Idle,
        }
    }

    pub fn from_config(config: &GalleryConfig) -> Self {
        let mut state = Self::new(config.effective_page_size());
        state.query_policy = config.query_policy;
        state.jump_to_new_item = config.jump_to_new_item;
        state
    }

    /// Seed the local uploads loaded at startup
    pub fn with_local_items(mut self, items: Vec<PhotoItem>) -> Self {
        self.local = items;
        self.clamp_page();
        self
    }

    pub fn with_query_policy(mut self, policy: QueryPagePolicy) -> Self {
        self.query_policy = policy;
        self
    }

    pub fn with_jump_to_new_item(mut self, jump: bool) -> Self {
        self.jump_to_new_item = jump;
        self
    }

    // ========== Accessors ==========

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn remote_items(&self) -> &[PhotoItem] {
        &self.remote
    }

    pub fn local_items(&self) -> &[PhotoItem] {
        &self.local
    }

    /// Remote photos followed by local uploads
    pub fn items(&self) -> impl Iterator<Item = &PhotoItem> {
        self.remote.iter().chain(self.local.iter())
    }

    fn filtered(&self) -> impl Iterator<Item = &PhotoItem> {
        self.items().filter(|item| filter::matches(item, &self.needle))
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered().count()
    }

    /// Page count for the current filter; 1 when nothing matches
    pub fn total_pages(&self) -> usize {
        self.pages_for(self.filtered_count())
    }

    fn pages_for(&self, count: usize) -> usize {
        count.div_ceil(self.page_size).max(1)
    }

    fn clamp_page(&mut self) {
        self.page_index = self.page_index.clamp(1, self.total_pages());
    }

    // ========== Mutations ==========

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        let needle = filter::normalize(&query);
        // Padding or case edits leave the filter, and so the page, alone
        let changed = needle != self.needle;
        self.needle = needle;
        self.query = query;

        let total_pages = self.total_pages();
        match self.query_policy {
            QueryPagePolicy::AlwaysReset if changed => self.page_index = 1,
            _ if self.page_index > total_pages => self.page_index = 1,
            _ => {}
        }
    }

    /// Move to page `n`, clamped into range
    pub fn set_page(&mut self, n: usize) {
        let target = n.clamp(1, self.total_pages());
        if target != self.page_index {
            self.page_index = target;
        }
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page_index.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page_index + 1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items().any(|item| item.id == id)
    }

    /// Append a local upload. When the upload matches the current filter,
    /// lands past the current page and jumping is enabled, the view moves
    /// to the page that shows it.
    ///
    /// Ids must stay unique for `detail` lookups, so an upload whose id is
    /// already held is dropped and `false` returned.
    pub fn add_local_item(&mut self, item: PhotoItem) -> bool {
        if self.contains(&item.id) {
            warn!("⚠️  Skipping upload {}: id already in the gallery", item.id);
            return false;
        }
        let visible = filter::matches(&item, &self.needle);
        debug!("Adding local upload {}", item.id);
        self.local.push(item);

        if visible && self.jump_to_new_item {
            // The upload is the last filtered item, so its page is the last one
            let item_page = self.total_pages();
            if item_page > self.page_index {
                self.page_index = item_page;
            }
        }
        self.clamp_page();
        true
    }

    /// Mark the remote collection as being (re)fetched
    pub fn begin_fetch(&mut self) {
        self.status = FetchStatus::Loading;
    }

    /// Deliver a fresh remote list
    pub fn replace_remote_items(&mut self, items: Vec<PhotoItem>) {
        info!("✅ Received {} remote photos", items.len());
        self.remote = items;
        self.status = FetchStatus::Ready;
        self.clamp_page();
    }

    /// Record a failed fetch. Held photos are kept, but the view shows
    /// nothing until the next successful delivery.
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("⚠️  Photo fetch failed: {}", message);
        self.status = FetchStatus::Failed(message);
    }

    // ========== Views ==========

    /// Current page of filtered photos joined with their annotations
    pub fn view<A: AnnotationStore + ?Sized>(&self, annotations: &A) -> View {
        if self.status.error().is_some() {
            return View {
                items: Vec::new(),
                page_index: 1,
                total_pages: 1,
                total_count: 0,
                status: self.status.clone(),
            };
        }

        let total_count = self.filtered_count();
        let items = self
            .filtered()
            .skip((self.page_index - 1) * self.page_size)
            .take(self.page_size)
            .map(|photo| annotate(photo, annotations))
            .collect();

        View {
            items,
            page_index: self.page_index,
            total_pages: self.pages_for(total_count),
            total_count,
            status: self.status.clone(),
        }
    }

    /// Detail page for one photo, searched across every held photo
    /// regardless of the current filter
    pub fn detail<A: AnnotationStore + ?Sized>(
        &self,
        id: &str,
        annotations: &A,
    ) -> Option<PhotoDetail> {
        let all: Vec<&PhotoItem> = self.items().collect();
        let index = all.iter().position(|item| item.id == id)?;
        let photo = all[index];

        let previous_id = index
            .checked_sub(1)
            .map(|i| all[i].id.clone());
        let next_id = all.get(index + 1).map(|item| item.id.clone());
        let related = all
            .iter()
            .filter(|item| item.album_id == photo.album_id && item.id != photo.id)
            .take(RELATED_LIMIT)
            .map(|item| (*item).clone())
            .collect();

        Some(PhotoDetail {
            photo: annotate(photo, annotations),
            previous_id,
            next_id,
            related,
        })
    }
}

fn annotate<A: AnnotationStore + ?Sized>(photo: &PhotoItem, annotations: &A) -> AnnotatedPhoto {
    AnnotatedPhoto {
        photo: photo.clone(),
        annotation: annotations.annotation(&photo.id),
    }
}
