//! Crawl orchestration: classification, fetching, and traversal
//!
//! The traversal engine drives the multi-stage dependent fetch graph
//! (session list → bill data → versioned documents) and routes classified
//! results into branch-termination decisions.

mod classify;
mod fetcher;
mod traversal;

pub use classify::{classify, classify_transport, Classification};
pub use fetcher::Fetcher;
pub use traversal::{CrawlStats, ParliamentOutcome, SessionOutcome, TraversalEngine};

use crate::config::Config;
use crate::storage::open_storage;
use crate::CrawlError;
use std::path::Path;

/// Runs a complete crawl with the given configuration
///
/// Opening the persistence connection is the one startup step allowed to
/// abort the run; every later failure is contained to its branch.
pub async fn crawl(config: Config) -> Result<(), CrawlError> {
    let sink = open_storage(Path::new(&config.output.database_path))?;
    let engine = TraversalEngine::new(config, sink)?;
    engine.run().await
}
