use crate::post::post_model::{PostRecord, UpsertPostRequest, validate_post_id};
use crate::post::references::referenced_assets;
use crate::storage::{AssetStore, ContentStore, IndexStore};
use crate::utils::config::AppConfig;
use crate::utils::error::AppError;
use crate::utils::helpers::{default_post_date, format_size, generate_post_id};
use chrono::Utc;
use log::{error, info, warn};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Result of an orphan sweep
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub deleted: Vec<String>,
    pub bytes_reclaimed: u64,
}

impl CleanupReport {
    pub fn space_reclaimed(&self) -> String {
        format_size(self.bytes_reclaimed)
    }
}

/// Keeps the index, the Markdown bodies and the uploaded images consistent.
///
/// Every mutation is a full read-modify-write of `posts.json`. The mutex only
/// serializes writers inside this process; another process writing the same
/// files still races with us.
pub struct PostService {
    index: IndexStore,
    contents: ContentStore,
    assets: AssetStore,
    write_lock: Mutex<()>,
}

impl PostService {
    pub fn new(config: &AppConfig) -> Self {
        PostService {
            index: IndexStore::new(&config.index_file),
            contents: ContentStore::new(&config.posts_dir),
            assets: AssetStore::new(&config.uploads_dir),
            write_lock: Mutex::new(()),
        }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn contents(&self) -> &ContentStore {
        &self.contents
    }

    /// Current snapshot of the index, in display order
    pub async fn list_posts(&self) -> Result<Vec<PostRecord>, AppError> {
        let _guard = self.write_lock.lock().await;
        self.index.load()
    }

    /// Insert a new post at the front of the index, or replace an existing one in place
    pub async fn upsert_post(
        &self,
        request: UpsertPostRequest,
    ) -> Result<(PostRecord, UpsertOutcome), AppError> {
        let title = request.title.unwrap_or_default();
        let content = request.content.unwrap_or_default();
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title and content are required".into(),
            ));
        }

        let id = request
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| generate_post_id(Utc::now()));
        validate_post_id(&id)?;

        let record = PostRecord {
            id,
            title,
            date: request
                .date
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(default_post_date),
            tags: request.tags,
            summary: request.summary.unwrap_or_default(),
            cover: request.cover.filter(|c| !c.trim().is_empty()),
        };

        let _guard = self.write_lock.lock().await;

        // Load first so a broken index fails the request before anything is written
        let mut posts = self.index.load()?;
        let previous_body = self.contents.read(&record.id)?;
        self.contents.write(&record.id, &content)?;

        let outcome = match posts.iter().position(|p| p.id == record.id) {
            Some(existing) => {
                posts[existing] = record.clone();
                UpsertOutcome::Updated
            }
            None => {
                posts.insert(0, record.clone());
                UpsertOutcome::Created
            }
        };

        if let Err(e) = self.index.save(&posts) {
            self.restore_body(&record.id, previous_body.as_deref());
            return Err(e);
        }
        info!("[SUCCESS] Article {} saved ({:?}).", record.id, outcome);

        Ok((record, outcome))
    }

    /// Put a body back the way it was before a failed upsert
    fn restore_body(&self, id: &str, previous: Option<&str>) {
        let restored = match previous {
            Some(body) => self.contents.write(id, body),
            None => self.contents.remove(id).map(|_| ()),
        };
        match restored {
            Ok(()) => warn!("Index write failed, body of {} rolled back", id),
            Err(e) => error!("Index write failed and body of {} could not be rolled back: {}", id, e),
        }
    }

    /// Remove a post and its body. Unknown ids are not an error.
    ///
    /// Returns whether anything was actually removed. Cover and inline images are
    /// left in place for [`PostService::reclaim_assets`].
    pub async fn delete_post(&self, id: &str) -> Result<bool, AppError> {
        validate_post_id(id)?;

        let _guard = self.write_lock.lock().await;

        let mut posts = self.index.load()?;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        let removed_entry = posts.len() != before;
        if removed_entry {
            self.index.save(&posts)?;
        }

        let removed_file = self.contents.remove(id)?;

        if removed_entry || removed_file {
            info!("[SUCCESS] Article {} deleted.", id);
        } else {
            info!("Article {} already absent, nothing to delete.", id);
        }

        Ok(removed_entry || removed_file)
    }

    /// Delete every uploaded image no cover or body refers to.
    ///
    /// The whole reference set is built before the first deletion.
    pub async fn reclaim_assets(&self) -> Result<CleanupReport, AppError> {
        let _guard = self.write_lock.lock().await;

        let stored = self.assets.list()?;
        if stored.is_empty() {
            return Ok(CleanupReport::default());
        }

        let posts = self.index.load()?;
        let bodies = self.contents.read_all()?;
        let referenced = referenced_assets(&posts, bodies.iter().map(|(_, body)| body.as_str()));

        let mut report = CleanupReport::default();
        for asset in stored {
            if referenced.contains(&asset.name) {
                continue;
            }
            match self.assets.remove(&asset.name) {
                Ok(true) => {
                    info!("Reclaimed orphan asset {} ({} bytes)", asset.name, asset.size);
                    report.bytes_reclaimed += asset.size;
                    report.deleted.push(asset.name);
                }
                Ok(false) => {}
                Err(e) => warn!("Failed to delete orphan asset {}: {}", asset.name, e),
            }
        }

        info!(
            "Cleanup finished: {} file(s), {} reclaimed from {}",
            report.deleted.len(),
            report.space_reclaimed(),
            self.index.path().display()
        );

        Ok(report)
    }
}
