use serde::Deserialize;

/// Main configuration structure for legiscrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub http: HttpConfig,
    pub endpoints: EndpointConfig,
    pub output: OutputConfig,
}

/// Traversal bounds and enumeration policy
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// First parliament number to enumerate
    #[serde(rename = "first-parliament")]
    pub first_parliament: u32,

    /// Hard upper bound on parliament enumeration
    #[serde(rename = "max-parliament")]
    pub max_parliament: u32,

    /// Sessions probed per parliament, starting at 1
    #[serde(rename = "max-sessions")]
    pub max_sessions: u32,

    /// Upper bound on the version-index probe per bill document branch
    #[serde(rename = "max-versions")]
    pub max_versions: u32,

    /// Stop the parliament loop after this many consecutive parliaments in
    /// which every session-list fetch classified Terminal
    #[serde(rename = "stop-after-empty-parliaments")]
    pub stop_after_empty_parliaments: u32,

    /// Document type categories probed per bill
    #[serde(rename = "document-types", default = "default_document_types")]
    pub document_types: Vec<String>,
}

fn default_document_types() -> Vec<String> {
    vec!["Government".to_string(), "Private".to_string()]
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ceiling on concurrent in-flight requests
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Attempts for a transient failure before the branch is abandoned
    #[serde(rename = "retry-attempts", default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Delay between retry attempts in milliseconds
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    5000
}

/// Upstream document API location
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the bill publication service
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: String,
}
