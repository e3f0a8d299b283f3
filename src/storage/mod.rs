//! Flat-file persistence: the posts index, Markdown bodies and uploaded images.
//!
//! Every store treats a missing file or directory as empty state. None of them
//! lock; serialization of writers is the job of `PostService`.

pub mod asset_store;
pub mod content_store;
pub mod index_store;

pub use asset_store::{AssetStore, StoredAsset};
pub use content_store::ContentStore;
pub use index_store::IndexStore;
