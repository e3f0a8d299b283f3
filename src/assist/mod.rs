//! Optional AI helper that drafts post metadata from the Markdown body.

pub mod assist_client;
pub mod controller;
pub mod index;
