//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Bundled emoji corpus.
pub mod emoji;
/// Directory HTTP client.
pub mod http;
/// Profile-image compression.
pub mod image;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use emoji::EmojiCorpus;
pub use http::{DEFAULT_BASE_URL, HttpUserDirectory};
pub use image::{CompressedImage, compress_profile_image};
