//! Configuration module for legiscrawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Crawl bounds, endpoint base URLs, HTTP behavior, and the output
//! database path all live here; nothing is a module-level constant.

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, EndpointConfig, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::load_config;
