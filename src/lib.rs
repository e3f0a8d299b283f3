//! File-backed blog backend: Markdown posts, a JSON index and uploaded images
//! kept in step with each other.

pub mod assist;
pub mod middleware;
pub mod post;
pub mod router;
pub mod storage;
pub mod uploader;
pub mod utils;
