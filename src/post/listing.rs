use crate::post::post_model::PostRecord;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of the current view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub items: Vec<PostRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// List state behind the home page: full snapshot, filtered view, current page
#[derive(Debug, Clone)]
pub struct PostListing {
    all: Vec<PostRecord>,
    filtered: Vec<PostRecord>,
    current_page: usize,
    per_page: usize,
}

impl PostListing {
    pub fn new(posts: Vec<PostRecord>, per_page: usize) -> Self {
        Self {
            filtered: posts.clone(),
            all: posts,
            current_page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.per_page)
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages().max(1))
    }

    /// `HOME` or an empty category shows everything; otherwise match against the tags
    pub fn filter_by_category(&mut self, category: &str) {
        let category = category.trim();
        if category.is_empty() || category.eq_ignore_ascii_case("HOME") {
            self.filtered = self.all.clone();
        } else {
            let needle = category.to_lowercase();
            self.filtered = self
                .all
                .iter()
                .filter(|p| p.tags.join(" ").to_lowercase().contains(&needle))
                .cloned()
                .collect();
        }
        self.current_page = 1;
    }

    /// Search the whole snapshot; replaces any category filter. Empty query shows everything.
    pub fn search(&mut self, query: &str) {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            self.filtered = self.all.clone();
        } else {
            self.filtered = self
                .all
                .iter()
                .filter(|p| {
                    p.title.to_lowercase().contains(&needle)
                        || p.summary.to_lowercase().contains(&needle)
                        || p.tags.join(" ").to_lowercase().contains(&needle)
                })
                .cloned()
                .collect();
        }
        self.current_page = 1;
    }

    pub fn page(&mut self, page: usize) -> Page {
        self.current_page = self.clamp_page(page);
        let start = (self.current_page - 1) * self.per_page;
        let items = self
            .filtered
            .iter()
            .skip(start)
            .take(self.per_page)
            .cloned()
            .collect();

        Page {
            items,
            page: self.current_page,
            total_pages: self.total_pages(),
            total: self.filtered.len(),
        }
    }

    /// Drop a deleted post from the cache and step back if its page emptied
    pub fn remove(&mut self, id: &str) {
        self.all.retain(|p| p.id != id);
        self.filtered.retain(|p| p.id != id);
        self.current_page = self.clamp_page(self.current_page);
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }
}
