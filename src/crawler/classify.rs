//! Fetch classifier: maps a completed HTTP exchange to a traversal decision
//!
//! Pure classification with no side effects; callers log based on the
//! returned kind. The taxonomy drives all branch control flow:
//!
//! - `Success`: 200 with a body; parse and generate dependent work
//! - `Terminal`: 301/302/404; expected end-of-data, the branch stops cleanly
//! - `Transient`: network failure or 5xx; retried by the fetch layer, never
//!   treated as a permanent prune
//! - `Fatal`: a success-shaped response that violates expectations; the
//!   branch stops but is flagged distinctly from Terminal

/// Classified outcome of an HTTP exchange
#[derive(Debug, Clone)]
pub enum Classification {
    /// Status 200 with a body present
    Success { body: String },

    /// No more data at this coordinate (301, 302, or 404)
    Terminal { status: u16 },

    /// Network/timeout error or 5xx; eligible for retry
    Transient { reason: String },

    /// Response shape anomaly worth operator attention
    Fatal { reason: String },
}

impl Classification {
    pub fn is_transient(&self) -> bool {
        matches!(self, Classification::Transient { .. })
    }
}

/// Classifies a completed HTTP response
///
/// `body` is the response text for 2xx responses; other statuses classify on
/// the status code alone.
pub fn classify(status: u16, body: Option<String>) -> Classification {
    match status {
        200 => match body {
            Some(body) if !body.is_empty() => Classification::Success { body },
            _ => Classification::Fatal {
                reason: "status 200 with empty body".to_string(),
            },
        },
        301 | 302 | 404 => Classification::Terminal { status },
        500..=599 => Classification::Transient {
            reason: format!("server error {}", status),
        },
        other => Classification::Fatal {
            reason: format!("unexpected status {}", other),
        },
    }
}

/// Classifies a transport-level failure (no response was received)
pub fn classify_transport(error: &reqwest::Error) -> Classification {
    let reason = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };

    Classification::Transient { reason }
}
