use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Backend root, e.g. `http://localhost:8080`. Endpoint paths are appended.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Response bodies beyond this size are rejected while streaming.
    pub max_body_bytes: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            max_body_bytes: 1024 * 1024,
        }
    }
}
