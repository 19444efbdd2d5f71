//! Legiscrawl: a legislature bill-tracking crawler
//!
//! This crate crawls a LegisInfo-style bill publication service, discovering
//! bills across parliaments and sessions, probing versioned bill documents,
//! and persisting normalized Bill / BillVersion / Vote records into SQLite
//! with idempotent first-write-wins upserts.

pub mod config;
pub mod crawler;
pub mod endpoints;
pub mod model;
pub mod normalize;
pub mod parse;
pub mod storage;

use thiserror::Error;

/// Main error type for legiscrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Document parse error: {0}")]
    Parse(#[from] parse::ParseError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for legiscrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Classification, TraversalEngine};
pub use model::{Bill, BillKey, BillVersion, Record, Vote};
