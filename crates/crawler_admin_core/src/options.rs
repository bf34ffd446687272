use serde::{Deserialize, Serialize};

/// What to do with the scheduler flag when the backend does not acknowledge
/// a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SchedulerPolicy {
    /// Keep the optimistic local value.
    #[default]
    Optimistic,
    /// Revert the local value if it still shows the unacknowledged request.
    RollbackOnFailure,
}

/// How a response is matched back to records when the list may have changed
/// while the request was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResultBinding {
    /// Follow the record ids captured when the request was sent. Removed
    /// records are skipped, shifted records keep their own errors.
    #[default]
    Identity,
    /// Apply by submitted position to whatever record sits there now.
    Positional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scheduler_policy: SchedulerPolicy,
    pub result_binding: ResultBinding,
}
