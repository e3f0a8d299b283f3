use crate::utils::error::AppError;
use crate::utils::helpers::generate_asset_name;
use std::fs;
use std::io;
use std::path::PathBuf;

/// URL path under which uploaded images are served and referenced
pub const ASSET_URL_PREFIX: &str = "/uploads/images/";

/// An image file currently on disk
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAsset {
    pub name: String,
    pub size: u64,
}

/// Uploaded images, stored flat under generated names
pub struct AssetStore {
    dir: PathBuf,
}

/// Asset names are generated by us; anything path-like is rejected
pub fn is_safe_asset_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains("..")
}

impl AssetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn public_url(name: &str) -> String {
        format!("{}{}", ASSET_URL_PREFIX, name)
    }

    /// Store `data` under a fresh unique name with the given extension (without dot)
    pub fn save(&self, extension: &str, data: &[u8]) -> Result<String, AppError> {
        fs::create_dir_all(&self.dir)?;
        let name = generate_asset_name(&format!(".{}", extension.to_lowercase()));
        fs::write(self.dir.join(&name), data)?;
        Ok(name)
    }

    /// Every regular, non-hidden file with its size. Missing directory → empty.
    pub fn list(&self) -> Result<Vec<StoredAsset>, AppError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut assets = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            assets.push(StoredAsset {
                name,
                size: metadata.len(),
            });
        }

        assets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(assets)
    }

    pub fn read(&self, name: &str) -> Result<Option<Vec<u8>>, AppError> {
        if !is_safe_asset_name(name) {
            return Ok(None);
        }
        match fs::read(self.dir.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an asset. Returns whether a file was removed.
    pub fn remove(&self, name: &str) -> Result<bool, AppError> {
        if !is_safe_asset_name(name) {
            return Ok(false);
        }
        match fs::remove_file(self.dir.join(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_list_read_remove() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("uploads").join("images"));

        let name = store.save("PNG", b"fake image").unwrap();
        assert!(name.ends_with(".png"));
        assert_eq!(AssetStore::public_url(&name), format!("/uploads/images/{}", name));

        let listed = store.list().unwrap();
        assert_eq!(
            listed,
            vec![StoredAsset {
                name: name.clone(),
                size: 10
            }]
        );
        assert_eq!(store.read(&name).unwrap().as_deref(), Some(&b"fake image"[..]));

        assert!(store.remove(&name).unwrap());
        assert!(!store.remove(&name).unwrap());
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.read("x.png").unwrap(), None);
    }

    #[test]
    fn list_skips_hidden_files_and_directories() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        fs::write(dir.path().join(".gitkeep"), "").unwrap();
        fs::create_dir(dir.path().join("thumbs")).unwrap();
        fs::write(dir.path().join("a.gif"), "gif").unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["a.gif"]);
    }

    #[test]
    fn unsafe_names_are_refused() {
        let dir = tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("images"));
        fs::write(dir.path().join("secret.txt"), "s").unwrap();

        assert_eq!(store.read("../secret.txt").unwrap(), None);
        assert!(!store.remove("../secret.txt").unwrap());
        assert!(dir.path().join("secret.txt").exists());
    }
}
