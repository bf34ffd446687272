use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use crawler_admin_core::{CrawlTargetConfig, RecordId};

use crate::{CrawlerBackend, FailureKind, GatewayError, GatewayEvent, SyncGateway};

enum GatewayCommand {
    LoadConfigs,
    LoadScheduler,
    SetScheduler {
        enabled: bool,
    },
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

/// Runs gateway calls on a background runtime so the caller never blocks.
///
/// Each request produces exactly one [`GatewayEvent`]. Requests are not
/// ordered relative to each other and cannot be cancelled.
pub struct GatewayHandle {
    cmd_tx: mpsc::Sender<GatewayCommand>,
    event_rx: mpsc::Receiver<GatewayEvent>,
}

impl GatewayHandle {
    pub fn new<B>(gateway: SyncGateway<B>) -> Result<Self, GatewayError>
    where
        B: CrawlerBackend + 'static,
    {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|err| GatewayError::new(FailureKind::Setup, err.to_string()))?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let gateway = Arc::new(gateway);

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let gateway = gateway.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(gateway.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_configs(&self) {
        self.send(GatewayCommand::LoadConfigs);
    }

    pub fn load_scheduler(&self) {
        self.send(GatewayCommand::LoadScheduler);
    }

    pub fn set_scheduler(&self, enabled: bool) {
        self.send(GatewayCommand::SetScheduler { enabled });
    }

    pub fn save_all(&self, submitted: Vec<RecordId>, configs: Vec<CrawlTargetConfig>) {
        self.send(GatewayCommand::SaveAll { submitted, configs });
    }

    pub fn test_one(&self, record: RecordId, index: usize, config: CrawlTargetConfig) {
        self.send(GatewayCommand::TestOne {
            record,
            index,
            config,
        });
    }

    pub fn try_recv(&self) -> Option<GatewayEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<GatewayEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: GatewayCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command<B: CrawlerBackend>(
    gateway: &SyncGateway<B>,
    command: GatewayCommand,
) -> GatewayEvent {
    match command {
        GatewayCommand::LoadConfigs => GatewayEvent::ConfigsLoaded(gateway.load_configs().await),
        GatewayCommand::LoadScheduler => {
            GatewayEvent::SchedulerLoaded(gateway.load_scheduler_state().await)
        }
        GatewayCommand::SetScheduler { enabled } => GatewayEvent::SchedulerSynced {
            requested: enabled,
            acknowledged: gateway.set_scheduler_remote(enabled).await,
        },
        GatewayCommand::SaveAll { submitted, configs } => {
            let outcome = gateway.save_all(&configs).await;
            GatewayEvent::SaveFinished { submitted, outcome }
        }
        GatewayCommand::TestOne {
            record,
            index,
            config,
        } => GatewayEvent::TestFinished {
            record,
            index,
            outcome: gateway.test_one(&config).await,
        },
    }
}
