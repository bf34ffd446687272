use crate::{CrawlTargetConfig, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadConfigs,
    LoadScheduler,
    /// Ask the operator to confirm deleting the record at `index`.
    ConfirmRemoval { index: usize, record: RecordId },
    SetSchedulerRemote { enabled: bool },
    /// `submitted[i]` is the id of `configs[i]`.
    SaveAll {
        submitted: Vec<RecordId>,
        configs: Vec<CrawlTargetConfig>,
    },
    TestOne {
        record: RecordId,
        index: usize,
        config: CrawlTargetConfig,
    },
}
