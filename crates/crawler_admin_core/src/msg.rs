use crate::{ConfigField, CrawlTargetConfig, RecordId, SaveOutcome, TestOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Console is up; fetch persisted state.
    SessionStarted,
    /// Persisted configs arrived (already normalised to client form).
    ConfigsLoaded(Vec<CrawlTargetConfig>),
    /// Persisted scheduler flag arrived.
    SchedulerLoaded(bool),
    /// Operator changed one field of one record.
    FieldEdited {
        index: usize,
        field: ConfigField,
        value: String,
    },
    /// Operator asked for a new blank record.
    AddClicked,
    /// Operator asked to delete a record; nothing changes until confirmed.
    RemoveRequested { index: usize },
    RemovalConfirmed,
    RemovalCancelled,
    /// Operator flipped the scheduler switch.
    SchedulerToggled,
    /// Backend answered (or failed to answer) a scheduler toggle.
    SchedulerSyncFinished { requested: bool, acknowledged: bool },
    SaveClicked,
    /// Bulk save finished. `submitted` lists the record ids in the order
    /// they were sent.
    SaveFinished {
        submitted: Vec<RecordId>,
        outcome: SaveOutcome,
    },
    TestClicked { index: usize },
    /// Test of a single record finished.
    TestFinished {
        record: RecordId,
        index: usize,
        outcome: TestOutcome,
    },
    HeadlineDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
