use crate::utils::error::AppError;
use std::fs;
use std::io;
use std::path::PathBuf;

/// One Markdown file per post, `<id>.md`
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.md", id))
    }

    /// Read a post body, `None` if the file does not exist
    pub fn read(&self, id: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(id)) {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write (or overwrite) a post body, creating the directory as needed
    pub fn write(&self, id: &str, body: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(id), body)?;
        Ok(())
    }

    /// Remove a post body. Returns whether a file was deleted.
    pub fn remove(&self, id: &str) -> Result<bool, AppError> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Ids of every `.md` file in the directory, sorted
    pub fn list_ids(&self) -> Result<Vec<String>, AppError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().map(|e| e != "md").unwrap_or(true) {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                let stem = stem.to_string_lossy();
                if !stem.starts_with('.') {
                    ids.push(stem.to_string());
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    /// Every stored body as `(id, markdown)`
    pub fn read_all(&self) -> Result<Vec<(String, String)>, AppError> {
        let mut bodies = Vec::new();
        for id in self.list_ids()? {
            if let Some(body) = self.read(&id)? {
                bodies.push((id, body));
            }
        }
        Ok(bodies)
    }
}
