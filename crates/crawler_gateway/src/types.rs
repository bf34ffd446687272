use std::fmt;

use crawler_admin_core::{CrawlTargetConfig, RecordId, SaveOutcome, TestOutcome};

/// Results delivered by [`crate::GatewayHandle`], one per issued request.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    ConfigsLoaded(Vec<CrawlTargetConfig>),
    SchedulerLoaded(bool),
    SchedulerSynced {
        requested: bool,
        acknowledged: bool,
    },
    SaveFinished {
        submitted: Vec<RecordId>,
        outcome: SaveOutcome,
    },
    TestFinished {
        record: RecordId,
        index: usize,
        outcome: TestOutcome,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct GatewayError {
    pub kind: FailureKind,
    pub message: String,
}

impl GatewayError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64 },
    Json,
    Setup,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
            FailureKind::Json => write!(f, "malformed json"),
            FailureKind::Setup => write!(f, "gateway setup failed"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
