//! Crawler admin core: pure state machine for the crawl-target forms and the
//! reconciliation of backend validation messages.
mod config;
mod effect;
mod form_list;
mod keywords;
mod msg;
mod options;
mod outcome;
mod reconcile;
mod state;
mod update;
mod view_model;

pub use config::{ConfigField, CrawlTargetConfig, FieldErrors, UnknownField};
pub use effect::Effect;
pub use form_list::{FormListState, RecordId};
pub use keywords::{keywords_to_list, keywords_to_text};
pub use msg::Msg;
pub use options::{AppOptions, ResultBinding, SchedulerPolicy};
pub use outcome::{SaveOutcome, TestOutcome};
pub use reconcile::{
    reconcile, split_test_messages, ErrorKey, Reconciliation, WireErrorPayload, GLOBAL_KEY,
};
pub use state::{AppState, SchedulerState};
pub use update::{
    update, SAVED_TEXT, SAVE_FAILED_TEXT, SCHEDULER_REVERTED_TEXT, TEST_FAILED_TEXT,
};
pub use view_model::{AppViewModel, Headline, RecordView, Tone};
