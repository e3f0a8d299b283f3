use crate::post::post_model::PostRecord;
use crate::utils::error::AppError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The JSON array of post metadata (`posts.json`)
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole index. A missing or blank file is an empty index.
    pub fn load(&self) -> Result<Vec<PostRecord>, AppError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    /// Rewrite the whole index through a sibling temp file
    pub fn save(&self, posts: &[PostRecord]) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(posts)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: &str) -> PostRecord {
        PostRecord {
            id: id.to_string(),
            title: format!("Title {}", id),
            date: "2024.01.01".to_string(),
            tags: vec!["rust".to_string()],
            summary: String::new(),
            cover: None,
        }
    }

    #[test]
    fn missing_or_blank_index_is_empty() {
        let dir = tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("posts.json"));
        assert!(store.load().unwrap().is_empty());

        fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("nested").join("posts.json"));

        store.save(&[record("b"), record("a")]).unwrap();
        let ids: Vec<String> = store.load().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("[\n  {"));
        assert!(!dir.path().join("nested").join("posts.json.tmp").exists());
    }

    #[test]
    fn malformed_index_is_an_error() {
        let dir = tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("posts.json"));
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.load(),
            Err(AppError::IndexFormatError(_))
        ));
    }

    #[test]
    fn legacy_string_tags_are_normalized() {
        let dir = tempdir().unwrap();
        let store = IndexStore::new(dir.path().join("posts.json"));
        fs::write(
            store.path(),
            r#"[{"id":"old","title":"Old","date":"2023.12.31","tags":"LIFE / RUST","summary":"s"}]"#,
        )
        .unwrap();

        let posts = store.load().unwrap();
        assert_eq!(posts[0].tags, vec!["LIFE", "RUST"]);
        assert_eq!(posts[0].cover, None);
    }
}
