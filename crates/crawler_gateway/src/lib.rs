//! Crawler gateway: wire format, HTTP transport and background execution of
//! backend calls for the admin console.
mod gateway;
mod handle;
mod settings;
mod transport;
mod types;
pub mod wire;

pub use gateway::SyncGateway;
pub use handle::GatewayHandle;
pub use settings::GatewaySettings;
pub use transport::{CrawlerBackend, ReqwestBackend};
pub use types::{FailureKind, GatewayError, GatewayEvent};
