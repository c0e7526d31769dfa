//! Normalization of remote photo payloads
//!
//! Photo APIs disagree on shape. Each supported shape is mapped into a
//! [`PhotoItem`] here so nothing downstream has to branch on the source.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::state::data::PhotoItem;

/// JSONPlaceholder `/photos` record
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceholderPhoto {
    id: Value,
    album_id: i64,
    title: String,
    url: String,
    thumbnail_url: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    full: Option<String>,
    regular: Option<String>,
    small: Option<String>,
    thumb: Option<String>,
}

/// Unsplash `/photos` record
#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: Value,
    description: Option<String>,
    alt_description: Option<String>,
    urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPhoto {
    Placeholder(PlaceholderPhoto),
    Unsplash(UnsplashPhoto),
}

impl From<RawPhoto> for PhotoItem {
    fn from(raw: RawPhoto) -> Self {
        match raw {
            RawPhoto::Placeholder(p) => PhotoItem {
                id: id_string(&p.id),
                description: p.title,
                thumbnail_url: p.thumbnail_url,
                full_url: p.url,
                album_id: p.album_id,
            },
            RawPhoto::Unsplash(u) => {
                let full_url = u
                    .urls
                    .full
                    .or(u.urls.regular)
                    .unwrap_or_default();
                let thumbnail_url = u
                    .urls
                    .thumb
                    .or(u.urls.small)
                    .unwrap_or_else(|| full_url.clone());
                PhotoItem {
                    id: id_string(&u.id),
                    description: u
                        .description
                        .or(u.alt_description)
                        .unwrap_or_default(),
                    thumbnail_url,
                    full_url,
                    album_id: 0,
                }
            }
        }
    }
}

/// Ids arrive as numbers or strings; keep strings as-is
fn id_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a JSON array of photo records in any supported shape
pub fn parse_payload(json: &str) -> Result<Vec<PhotoItem>> {
    let raw: Vec<RawPhoto> = serde_json::from_str(json)?;
    Ok(raw.into_iter().map(PhotoItem::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_records_map_title_and_urls() {
        let json = r#"[{
            "albumId": 1,
            "id": 1,
            "title": "accusamus beatae ad facilis cum similique qui sunt",
            "url": "https://via.placeholder.com/600/92c952",
            "thumbnailUrl": "https://via.placeholder.com/150/92c952"
        }]"#;

        let items = parse_payload(json).unwrap();
        assert_eq!(
            items,
            vec![PhotoItem {
                id: "1".into(),
                description: "accusamus beatae ad facilis cum similique qui sunt".into(),
                thumbnail_url: "https://via.placeholder.com/150/92c952".into(),
                full_url: "https://via.placeholder.com/600/92c952".into(),
                album_id: 1,
            }]
        );
    }

    #[test]
    fn test_unsplash_records_fall_back_to_alt_description() {
        let json = r#"[{
            "id": "LBI7cgq3pbM",
            "description": null,
            "alt_description": "man in brown jacket",
            "urls": {
                "full": "https://images.unsplash.com/full",
                "regular": "https://images.unsplash.com/regular",
                "small": "https://images.unsplash.com/small",
                "thumb": "https://images.unsplash.com/thumb"
            }
        }]"#;

        let item = parse_payload(json).unwrap().remove(0);
        assert_eq!(item.id, "LBI7cgq3pbM");
        assert_eq!(item.description, "man in brown jacket");
        assert_eq!(item.thumbnail_url, "https://images.unsplash.com/thumb");
        assert_eq!(item.full_url, "https://images.unsplash.com/full");
        assert_eq!(item.album_id, 0);
    }

    #[test]
    fn test_unsplash_thumbnail_falls_back_to_full_size() {
        let json = r#"[{"id": 9, "description": "x", "urls": {"regular": "r"}}]"#;
        let item = parse_payload(json).unwrap().remove(0);
        assert_eq!(item.id, "9");
        assert_eq!(item.full_url, "r");
        assert_eq!(item.thumbnail_url, "r");
    }

    #[test]
    fn test_mixed_shapes_parse_into_one_list() {
        let json = r#"[
            {"albumId": 2, "id": 51, "title": "t", "url": "u", "thumbnailUrl": "th"},
            {"id": "abc", "description": "d", "urls": {"full": "f", "thumb": "th"}}
        ]"#;
        let ids: Vec<String> = parse_payload(json).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["51", "abc"]);
    }

    #[test]
    fn test_unknown_shape_is_an_error() {
        assert!(parse_payload(r#"[{"name": "nope"}]"#).is_err());
        assert!(parse_payload("not json").is_err());
    }
}
