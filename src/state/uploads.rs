//! Persisted list of locally uploaded photos

use tracing::{debug, warn};

use super::data::PhotoItem;
use super::store::KeyValueStore;

/// Key holding the JSON array of local uploads
pub const LOCAL_UPLOADS_KEY: &str = "gallery-local-uploads";

/// Load the uploads list. A missing or malformed entry reads as empty.
pub fn load_local_uploads<S: KeyValueStore + ?Sized>(store: &S) -> Vec<PhotoItem> {
    let Some(json) = store.get(LOCAL_UPLOADS_KEY) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<PhotoItem>>(&json) {
        Ok(items) => {
            debug!("Loaded {} local uploads", items.len());
            items
        }
        Err(e) => {
            warn!("⚠️  Discarding malformed local uploads: {}", e);
            Vec::new()
        }
    }
}

pub fn save_local_uploads<S: KeyValueStore + ?Sized>(store: &mut S, items: &[PhotoItem]) {
    match serde_json::to_string(items) {
        Ok(json) => store.set(LOCAL_UPLOADS_KEY, &json),
        Err(e) => warn!("⚠️  Could not serialize local uploads: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;

    #[test]
    fn test_missing_key_loads_empty() {
        assert!(load_local_uploads(&MemoryStore::new()).is_empty());
    }

    #[test]
    fn test_malformed_json_loads_empty() {
        let mut store = MemoryStore::new();
        store.set(LOCAL_UPLOADS_KEY, "{not json");
        assert!(load_local_uploads(&store).is_empty());

        store.set(LOCAL_UPLOADS_KEY, r#"{"id":"1"}"#);
        assert!(load_local_uploads(&store).is_empty());
    }

    #[test]
    fn test_saved_uploads_load_back_in_order() {
        let mut store = MemoryStore::new();
        let items = vec![
            PhotoItem::local("first", "data:image/png;base64,AA"),
            PhotoItem::local("second", "data:image/png;base64,BB"),
        ];
        save_local_uploads(&mut store, &items);

        assert_eq!(load_local_uploads(&store), items);
    }
}
