pub mod config;
pub mod error;
pub mod helpers;
pub mod uploads;
