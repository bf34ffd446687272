use crate::{CrawlTargetConfig, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Failure,
}

/// One-line message shown above the forms until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Headline {
    pub tone: Tone,
    pub text: String,
}

impl Headline {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Success,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            tone: Tone::Failure,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub scheduler_enabled: bool,
    pub saving: bool,
    pub records: Vec<RecordView>,
    pub headline: Option<Headline>,
    /// Index of the record awaiting delete confirmation.
    pub pending_removal: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordView {
    pub index: usize,
    pub config: CrawlTargetConfig,
    pub errors: FieldErrors,
}
