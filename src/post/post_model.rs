use crate::utils::error::AppError;
use serde::{Deserialize, Deserializer, Serialize};

/// One entry of the posts index
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub cover: Option<String>,
}

impl PostRecord {
    /// Tags joined the way the list and editor display them
    pub fn tags_display(&self) -> String {
        self.tags.join(" / ")
    }
}

/// Body of `POST /api/upload`
#[derive(Debug, Default, Deserialize)]
pub struct UpsertPostRequest {
    pub id: Option<String>,
    pub title: Option<String>,
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub cover: Option<String>,
}

/// Body of `POST /api/delete`
#[derive(Debug, Deserialize)]
pub struct DeletePostRequest {
    #[serde(default)]
    pub id: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TagsInput {
    List(Vec<String>),
    Text(String),
}

/// Accepts `["a", "b"]`, `"a / b"`, `"a, b"` or null
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Option::<TagsInput>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(TagsInput::List(list)) => list
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        Some(TagsInput::Text(text)) => split_tags(&text),
    };
    Ok(tags)
}

/// Split a delimited tag string on `/` and `,`
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(['/', ','])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// A post id becomes a filename, so it must stay inside the posts directory
pub fn validate_post_id(id: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::ValidationError("Post id is required".into()));
    }
    if id.contains('/') || id.contains('\\') || id.contains("..") || id.starts_with('.') {
        return Err(AppError::ValidationError(format!(
            "Invalid post id '{}'",
            id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_accept_string_or_list() {
        let from_text: PostRecord = serde_json::from_value(json!({
            "id": "p1", "title": "T", "date": "2024.01.01",
            "tags": "RUST / Life,  notes ", "summary": ""
        }))
        .unwrap();
        assert_eq!(from_text.tags, vec!["RUST", "Life", "notes"]);
        assert_eq!(from_text.cover, None);

        let from_list: PostRecord = serde_json::from_value(json!({
            "id": "p2", "title": "T", "tags": ["a", " ", "b"], "cover": "/uploads/images/x.png"
        }))
        .unwrap();
        assert_eq!(from_list.tags, vec!["a", "b"]);
        assert_eq!(from_list.tags_display(), "a / b");
        assert_eq!(from_list.cover.as_deref(), Some("/uploads/images/x.png"));

        let from_null: UpsertPostRequest =
            serde_json::from_value(json!({ "title": "T", "tags": null })).unwrap();
        assert!(from_null.tags.is_empty());
    }

    #[test]
    fn record_serializes_tags_as_list_and_null_cover() {
        let record = PostRecord {
            id: "p1".into(),
            title: "Hello".into(),
            date: "2024.01.01".into(),
            tags: vec!["rust".into()],
            summary: "s".into(),
            cover: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["tags"], json!(["rust"]));
        assert!(value["cover"].is_null());
    }

    #[test]
    fn post_id_validation() {
        assert!(validate_post_id("post_20240101120000").is_ok());
        assert!(validate_post_id("").is_err());
        assert!(validate_post_id("   ").is_err());
        assert!(validate_post_id("../etc/passwd").is_err());
        assert!(validate_post_id("a/b").is_err());
        assert!(validate_post_id(".hidden").is_err());
    }
}
