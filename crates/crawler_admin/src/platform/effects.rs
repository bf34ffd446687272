use std::time::{Duration, Instant};

use crawler_admin_core::{Effect, Msg};
use crawler_gateway::{GatewayEvent, GatewayHandle};
use crawler_logging::{crawler_debug, crawler_warn};

/// Forwards backend effects to the gateway and turns its events back into
/// messages. Effects that need the operator are handed back to the caller.
pub struct EffectRunner {
    gateway: GatewayHandle,
    in_flight: usize,
}

impl EffectRunner {
    pub fn new(gateway: GatewayHandle) -> Self {
        Self {
            gateway,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Starts every backend effect and returns the ones left for the console.
    pub fn enqueue(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut interactive = Vec::new();
        for effect in effects {
            match effect {
                Effect::LoadConfigs => self.gateway.load_configs(),
                Effect::LoadScheduler => self.gateway.load_scheduler(),
                Effect::SetSchedulerRemote { enabled } => self.gateway.set_scheduler(enabled),
                Effect::SaveAll { submitted, configs } => {
                    crawler_debug!("SaveAll records={}", configs.len());
                    self.gateway.save_all(submitted, configs);
                }
                Effect::TestOne {
                    record,
                    index,
                    config,
                } => {
                    crawler_debug!("TestOne record={} index={} url={}", record, index, config.url);
                    self.gateway.test_one(record, index, config);
                }
                Effect::ConfirmRemoval { .. } => {
                    interactive.push(effect);
                    continue;
                }
            }
            self.in_flight += 1;
        }
        interactive
    }

    /// Waits until every started request has answered or `timeout` elapses.
    pub fn settle(&mut self, timeout: Duration) -> Vec<Msg> {
        let deadline = Instant::now() + timeout;
        let mut msgs = Vec::new();
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                crawler_warn!("{} requests still pending after {:?}", self.in_flight, timeout);
                break;
            }
            match self.gateway.recv_timeout(remaining) {
                Some(event) => {
                    self.in_flight -= 1;
                    msgs.push(event_to_msg(event));
                }
                None => continue,
            }
        }
        msgs
    }

    /// Collects whatever has already arrived without blocking.
    pub fn poll(&mut self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.gateway.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            msgs.push(event_to_msg(event));
        }
        msgs
    }
}

fn event_to_msg(event: GatewayEvent) -> Msg {
    match event {
        GatewayEvent::ConfigsLoaded(configs) => Msg::ConfigsLoaded(configs),
        GatewayEvent::SchedulerLoaded(enabled) => Msg::SchedulerLoaded(enabled),
        GatewayEvent::SchedulerSynced {
            requested,
            acknowledged,
        } => Msg::SchedulerSyncFinished {
            requested,
            acknowledged,
        },
        GatewayEvent::SaveFinished { submitted, outcome } => {
            Msg::SaveFinished { submitted, outcome }
        }
        GatewayEvent::TestFinished {
            record,
            index,
            outcome,
        } => Msg::TestFinished {
            record,
            index,
            outcome,
        },
    }
}
