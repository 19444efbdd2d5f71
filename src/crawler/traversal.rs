//! Traversal engine: enumeration policy over the crawl's discovery space
//!
//! The engine owns the (parliament, session) enumeration, the per-bill
//! fan-out, and the sequential version-index probe, consuming classified
//! fetch results and deciding whether each branch continues or terminates.
//! The upstream service never says "you are done"; termination is policy:
//!
//! - Parliament enumeration stops at the configured hard cap, or after
//!   `stop_after_empty_parliaments` consecutive parliaments in which every
//!   session-list fetch classified Terminal. A parliament with any
//!   successful session resets the streak; a parliament with an abandoned
//!   (transient or fatal) session is inconclusive and leaves the streak
//!   unchanged, so an outage never masquerades as the end of history.
//! - A session whose list fetch stays transient after retries is abandoned
//!   for this run and the crawl advances; it is never treated as Terminal.
//! - A version probe ends permanently at the first non-Success response.

use crate::config::Config;
use crate::crawler::classify::Classification;
use crate::crawler::fetcher::Fetcher;
use crate::endpoints;
use crate::model::{BillKey, Record};
use crate::normalize;
use crate::parse;
use crate::storage::{RecordSink, SqliteStorage, UpsertOutcome};
use crate::CrawlError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinSet;

/// Counters accumulated over one crawl run
#[derive(Debug, Default)]
pub struct CrawlStats {
    pub sessions_crawled: AtomicU64,
    pub bills_inserted: AtomicU64,
    pub versions_inserted: AtomicU64,
    pub votes_inserted: AtomicU64,
    pub records_ignored: AtomicU64,
    pub branches_abandoned: AtomicU64,
}

impl CrawlStats {
    fn bump(&self, counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Outcome of one session branch, as seen by the parliament loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The list fetch succeeded and the session's bills were processed
    Crawled,
    /// The list fetch classified Terminal: no data at this coordinate
    Terminal,
    /// The branch was abandoned (transient exhaustion or a fatal response)
    Abandoned,
}

/// Aggregate of a parliament's session outcomes, driving the stop heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParliamentOutcome {
    AllTerminal,
    AnySuccess,
    Inconclusive,
}

impl ParliamentOutcome {
    pub fn from_sessions(sessions: &[SessionOutcome]) -> Self {
        if sessions.iter().any(|s| *s == SessionOutcome::Crawled) {
            ParliamentOutcome::AnySuccess
        } else if sessions.iter().all(|s| *s == SessionOutcome::Terminal) {
            ParliamentOutcome::AllTerminal
        } else {
            ParliamentOutcome::Inconclusive
        }
    }
}

/// The crawl scheduler and dependent-fetch pipeline
///
/// Cheaply cloneable; clones share the fetcher, sink, and stats so branches
/// can be spawned as independent tasks.
#[derive(Clone)]
pub struct TraversalEngine {
    config: Arc<Config>,
    fetcher: Arc<Fetcher>,
    sink: Arc<Mutex<SqliteStorage>>,
    stats: Arc<CrawlStats>,
}

impl TraversalEngine {
    pub fn new(config: Config, sink: SqliteStorage) -> Result<Self, CrawlError> {
        let fetcher = Fetcher::new(&config.http)?;
        Ok(Self {
            config: Arc::new(config),
            fetcher: Arc::new(fetcher),
            sink: Arc::new(Mutex::new(sink)),
            stats: Arc::new(CrawlStats::default()),
        })
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    /// Runs the whole crawl: parliaments sequentially, everything beneath
    /// them concurrently
    pub async fn run(&self) -> Result<(), CrawlError> {
        let crawl = &self.config.crawl;
        let start = std::time::Instant::now();
        let mut empty_streak = 0u32;

        for parliament in crawl.first_parliament..=crawl.max_parliament {
            tracing::info!(parliament, "Crawling parliament");
            let outcome = self.crawl_parliament(parliament).await;

            match outcome {
                ParliamentOutcome::AnySuccess => empty_streak = 0,
                ParliamentOutcome::AllTerminal => {
                    empty_streak += 1;
                    if empty_streak >= crawl.stop_after_empty_parliaments {
                        tracing::info!(
                            parliament,
                            empty_streak,
                            "Consecutive all-terminal parliaments reached the stop threshold"
                        );
                        break;
                    }
                }
                ParliamentOutcome::Inconclusive => {
                    tracing::warn!(
                        parliament,
                        "Parliament outcome inconclusive; streak unchanged"
                    );
                }
            }
        }

        let stats = &self.stats;
        tracing::info!(
            sessions = stats.sessions_crawled.load(Ordering::Relaxed),
            bills = stats.bills_inserted.load(Ordering::Relaxed),
            versions = stats.versions_inserted.load(Ordering::Relaxed),
            votes = stats.votes_inserted.load(Ordering::Relaxed),
            ignored = stats.records_ignored.load(Ordering::Relaxed),
            abandoned = stats.branches_abandoned.load(Ordering::Relaxed),
            elapsed = ?start.elapsed(),
            "Crawl complete"
        );

        Ok(())
    }

    /// Crawls every session of one parliament concurrently and aggregates
    /// their outcomes for the stop heuristic
    async fn crawl_parliament(&self, parliament: u32) -> ParliamentOutcome {
        let mut tasks = JoinSet::new();

        for session in 1..=self.config.crawl.max_sessions {
            let engine = self.clone();
            tasks.spawn(async move { engine.crawl_session(parliament, session).await });
        }

        let mut outcomes = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!(parliament, error = %e, "Session task failed");
                    outcomes.push(SessionOutcome::Abandoned);
                }
            }
        }

        ParliamentOutcome::from_sessions(&outcomes)
    }

    /// Session branch: fetch the bills list and fan out per discovered bill
    async fn crawl_session(&self, parliament: u32, session: u32) -> SessionOutcome {
        let url = match endpoints::bills_list_url(&self.config.endpoints, parliament, session) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(parliament, session, error = %e, "Invalid bills-list URL");
                return SessionOutcome::Abandoned;
            }
        };

        let body = match self.fetcher.fetch(&url).await {
            Classification::Success { body } => body,
            Classification::Terminal { status } => {
                tracing::info!(
                    parliament,
                    session,
                    status,
                    "No bills list at this coordinate"
                );
                return SessionOutcome::Terminal;
            }
            Classification::Transient { reason } => {
                tracing::error!(
                    parliament,
                    session,
                    reason = %reason,
                    "Bills-list fetch still transient after retries; abandoning session"
                );
                self.stats.bump(&self.stats.branches_abandoned);
                return SessionOutcome::Abandoned;
            }
            Classification::Fatal { reason } => {
                tracing::error!(parliament, session, reason = %reason, "Bills-list fetch fatal");
                self.stats.bump(&self.stats.branches_abandoned);
                return SessionOutcome::Abandoned;
            }
        };

        let bills = match parse::parse_bills_list(&body) {
            Ok(bills) => bills,
            Err(e) => {
                tracing::error!(parliament, session, error = %e, "Unparseable bills list");
                self.stats.bump(&self.stats.branches_abandoned);
                return SessionOutcome::Abandoned;
            }
        };

        if bills.is_empty() {
            tracing::info!(parliament, session, "Session has no bills");
        }

        let mut tasks = JoinSet::new();
        for summary in bills {
            let number_code = match summary.number_code {
                Some(code) => code,
                None => {
                    tracing::warn!(parliament, session, "Bill entry without a number code");
                    continue;
                }
            };
            let key = BillKey::new(number_code, parliament, session);
            let engine = self.clone();
            tasks.spawn(async move { engine.crawl_bill(key).await });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(parliament, session, error = %e, "Bill task failed");
            }
        }

        self.stats.bump(&self.stats.sessions_crawled);
        SessionOutcome::Crawled
    }

    /// Bill fan-out: the data branch plus one version-probe branch per
    /// document type, all independent of each other
    async fn crawl_bill(&self, key: BillKey) {
        let mut tasks = JoinSet::new();

        {
            let engine = self.clone();
            let key = key.clone();
            tasks.spawn(async move { engine.bill_data_branch(key).await });
        }

        for document_type in &self.config.crawl.document_types {
            let engine = self.clone();
            let key = key.clone();
            let document_type = document_type.clone();
            tasks.spawn(async move { engine.version_branch(key, document_type).await });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!(bill = %key, error = %e, "Bill branch task failed");
            }
        }
    }

    /// Bill-data branch: one fetch yielding the Bill record and, when the
    /// payload signals royal assent, its embedded Vote records
    async fn bill_data_branch(&self, key: BillKey) {
        let url = match endpoints::bill_data_url(
            &self.config.endpoints,
            key.parliament,
            key.session,
            &key.number_code,
        ) {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(bill = %key, error = %e, "Invalid bill-data URL");
                return;
            }
        };

        let body = match self.fetcher.fetch(&url).await {
            Classification::Success { body } => body,
            Classification::Terminal { status } => {
                tracing::info!(bill = %key, status, "No bill data at this coordinate");
                return;
            }
            Classification::Transient { reason } => {
                tracing::error!(bill = %key, reason = %reason, "Bill-data fetch abandoned");
                self.stats.bump(&self.stats.branches_abandoned);
                return;
            }
            Classification::Fatal { reason } => {
                tracing::error!(bill = %key, reason = %reason, "Bill-data fetch fatal");
                self.stats.bump(&self.stats.branches_abandoned);
                return;
            }
        };

        let data = match parse::parse_bill_data(&body) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(bill = %key, error = %e, "Unparseable bill data");
                self.stats.bump(&self.stats.branches_abandoned);
                return;
            }
        };

        let bill = normalize::bill_from_data(&key, &data);
        self.persist(Record::Bill(bill));

        // Votes are emitted only from assented bills, straight from this
        // response; there is no further fetch
        for vote in normalize::votes_from_data(&key, &data) {
            self.persist(Record::Vote(vote));
        }
    }

    /// Version-probe branch: indices 1, 2, 3, ... strictly in order, ending
    /// permanently at the first non-Success classification
    async fn version_branch(&self, key: BillKey, document_type: String) {
        for version_index in 1..=self.config.crawl.max_versions {
            let url = match endpoints::bill_document_url(
                &self.config.endpoints,
                key.parliament,
                key.session,
                &document_type,
                &key.number_code,
                version_index,
            ) {
                Ok(url) => url,
                Err(e) => {
                    tracing::error!(bill = %key, document_type = %document_type, error = %e, "Invalid document URL");
                    return;
                }
            };

            let body = match self.fetcher.fetch(&url).await {
                Classification::Success { body } => body,
                Classification::Terminal { status } => {
                    tracing::info!(
                        bill = %key,
                        document_type = %document_type,
                        version_index,
                        status,
                        "End of version sequence"
                    );
                    return;
                }
                Classification::Transient { reason } => {
                    tracing::error!(
                        bill = %key,
                        document_type = %document_type,
                        version_index,
                        reason = %reason,
                        "Version probe abandoned"
                    );
                    self.stats.bump(&self.stats.branches_abandoned);
                    return;
                }
                Classification::Fatal { reason } => {
                    tracing::error!(
                        bill = %key,
                        document_type = %document_type,
                        version_index,
                        reason = %reason,
                        "Version probe fatal"
                    );
                    self.stats.bump(&self.stats.branches_abandoned);
                    return;
                }
            };

            match parse::parse_bill_document(&body) {
                Ok(Some(doc)) => {
                    let version =
                        normalize::version_from_document(&key, &document_type, version_index, &doc);
                    self.persist(Record::Version(version));
                }
                Ok(None) => {
                    tracing::warn!(
                        bill = %key,
                        document_type = %document_type,
                        version_index,
                        "Document without Identification section; probing continues"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        bill = %key,
                        document_type = %document_type,
                        version_index,
                        error = %e,
                        "Unparseable version document"
                    );
                    self.stats.bump(&self.stats.branches_abandoned);
                    return;
                }
            }
        }

        tracing::info!(bill = %key, document_type = %document_type, "Reached the configured max version count");
    }

    /// Persists one record; a storage failure is logged with the attempted
    /// values and never aborts sibling work
    fn persist(&self, record: Record) {
        let outcome = {
            let mut sink = self.sink.lock().unwrap();
            sink.upsert(&record)
        };

        match outcome {
            Ok(UpsertOutcome::Inserted) => {
                let counter = match &record {
                    Record::Bill(_) => &self.stats.bills_inserted,
                    Record::Version(_) => &self.stats.versions_inserted,
                    Record::Vote(_) => &self.stats.votes_inserted,
                };
                self.stats.bump(counter);
                tracing::debug!(kind = record.kind(), "Record persisted");
            }
            Ok(UpsertOutcome::Ignored) => {
                self.stats.bump(&self.stats.records_ignored);
                tracing::debug!(kind = record.kind(), "Record already present; kept first write");
            }
            Err(e) => {
                tracing::error!(
                    kind = record.kind(),
                    record = ?record,
                    error = %e,
                    "Failed to persist record; continuing with siblings"
                );
            }
        }
    }
}
