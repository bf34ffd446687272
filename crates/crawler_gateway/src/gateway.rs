use crawler_admin_core::{CrawlTargetConfig, SaveOutcome, TestOutcome};
use crawler_logging::{crawler_info, crawler_warn};

use crate::{CrawlerBackend, GatewayError, GatewaySettings, ReqwestBackend};

/// Boundary between the admin state and the backend.
///
/// Every call answers with a value the state machine can use directly. A
/// transport failure is logged and replaced by a safe default: no configs,
/// scheduler off, an unacknowledged toggle, a failed save or a generic test
/// failure.
pub struct SyncGateway<B> {
    backend: B,
}

impl SyncGateway<ReqwestBackend> {
    pub fn connect(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        Ok(Self::new(ReqwestBackend::new(settings)?))
    }
}

impl<B: CrawlerBackend> SyncGateway<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn load_configs(&self) -> Vec<CrawlTargetConfig> {
        match self.backend.fetch_configs().await {
            Ok(configs) => {
                crawler_info!("Loaded {} crawl targets", configs.len());
                configs
            }
            Err(err) => {
                crawler_warn!("Loading crawl targets failed, starting empty: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn load_scheduler_state(&self) -> bool {
        self.backend.fetch_scheduler().await.unwrap_or_else(|err| {
            crawler_warn!("Loading scheduler state failed, assuming off: {}", err);
            false
        })
    }

    pub async fn save_all(&self, configs: &[CrawlTargetConfig]) -> SaveOutcome {
        match self.backend.post_configs(configs).await {
            Ok(outcome) => {
                match &outcome {
                    SaveOutcome::Saved => crawler_info!("Saved {} crawl targets", configs.len()),
                    SaveOutcome::Rejected(payload) => {
                        crawler_info!("Save rejected with {} messages", payload.len())
                    }
                    SaveOutcome::Inconclusive { status } => {
                        crawler_warn!("Save answered {} without readable messages", status)
                    }
                    SaveOutcome::TransportFailed => {}
                }
                outcome
            }
            Err(err) => {
                crawler_warn!("Save failed: {}", err);
                SaveOutcome::TransportFailed
            }
        }
    }

    /// Returns whether the backend acknowledged the new state.
    pub async fn set_scheduler_remote(&self, enabled: bool) -> bool {
        match self.backend.post_scheduler(enabled).await {
            Ok(()) => true,
            Err(err) => {
                crawler_warn!("Scheduler toggle to {} not acknowledged: {}", enabled, err);
                false
            }
        }
    }

    pub async fn test_one(&self, config: &CrawlTargetConfig) -> TestOutcome {
        self.backend.post_test(config).await.unwrap_or_else(|err| {
            crawler_warn!("Test of {} failed: {}", config.url, err);
            TestOutcome::GenericFailure
        })
    }
}
