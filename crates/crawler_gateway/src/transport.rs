use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};

use crawler_admin_core::{CrawlTargetConfig, SaveOutcome, TestOutcome};
use crawler_logging::{crawler_debug, crawler_trace, next_request_id};

use crate::wire;
use crate::{FailureKind, GatewayError, GatewaySettings};

const CONFIGS_PATH: &str = "crawler/configs";
const SCHEDULER_PATH: &str = "crawler/scheduler";
const TEST_PATH: &str = "crawler/test";

/// Raw access to the crawler backend. Every failure is reported; deciding
/// what a failure means for the operator is left to [`crate::SyncGateway`].
#[async_trait::async_trait]
pub trait CrawlerBackend: Send + Sync {
    async fn fetch_configs(&self) -> Result<Vec<CrawlTargetConfig>, GatewayError>;

    async fn fetch_scheduler(&self) -> Result<bool, GatewayError>;

    /// `Ok` covers every answered request, including rejections.
    async fn post_configs(&self, configs: &[CrawlTargetConfig])
        -> Result<SaveOutcome, GatewayError>;

    async fn post_scheduler(&self, enabled: bool) -> Result<(), GatewayError>;

    async fn post_test(&self, config: &CrawlTargetConfig) -> Result<TestOutcome, GatewayError>;
}

struct RawResponse {
    status: StatusCode,
    body: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base: Url,
    max_body_bytes: u64,
}

impl ReqwestBackend {
    pub fn new(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        // A trailing slash makes `join` append instead of replacing the last segment.
        let mut base = settings.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base = Url::parse(&base)
            .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))?;

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::new(FailureKind::Setup, err.to_string()))?;

        Ok(Self {
            client,
            base,
            max_body_bytes: settings.max_body_bytes,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|err| GatewayError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        json_body: Option<Vec<u8>>,
    ) -> Result<RawResponse, GatewayError> {
        let request_id = next_request_id();
        crawler_debug!("request_id={} {} {}", request_id, method, url);

        let mut request = self.client.request(method, url);
        if let Some(body) = json_body {
            crawler_trace!("request_id={} json_len={}", request_id, body.len());
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_body_bytes {
                return Err(self.too_large());
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if body.len() as u64 + chunk.len() as u64 > self.max_body_bytes {
                return Err(self.too_large());
            }
            body.extend_from_slice(&chunk);
        }

        crawler_debug!(
            "request_id={} status={} body_len={}",
            request_id,
            status.as_u16(),
            body.len()
        );
        Ok(RawResponse { status, body })
    }

    fn too_large(&self) -> GatewayError {
        GatewayError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_body_bytes,
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl CrawlerBackend for ReqwestBackend {
    async fn fetch_configs(&self) -> Result<Vec<CrawlTargetConfig>, GatewayError> {
        let url = self.endpoint(CONFIGS_PATH)?;
        let response = self.send(Method::GET, url, None).await?;
        require_success(&response)?;
        wire::decode_configs(&response.body).map_err(json_error)
    }

    async fn fetch_scheduler(&self) -> Result<bool, GatewayError> {
        let url = self.endpoint(SCHEDULER_PATH)?;
        let response = self.send(Method::GET, url, None).await?;
        require_success(&response)?;
        wire::decode_scheduler(&response.body).map_err(json_error)
    }

    async fn post_configs(
        &self,
        configs: &[CrawlTargetConfig],
    ) -> Result<SaveOutcome, GatewayError> {
        let url = self.endpoint(CONFIGS_PATH)?;
        let body = wire::encode_configs(configs).map_err(json_error)?;
        let response = self.send(Method::POST, url, Some(body)).await?;
        if response.status.is_success() {
            return Ok(SaveOutcome::Saved);
        }
        Ok(match wire::decode_messages(&response.body) {
            Some(payload) => SaveOutcome::Rejected(payload),
            None => SaveOutcome::Inconclusive {
                status: response.status.as_u16(),
            },
        })
    }

    async fn post_scheduler(&self, enabled: bool) -> Result<(), GatewayError> {
        let mut url = self.endpoint(SCHEDULER_PATH)?;
        url.query_pairs_mut()
            .append_pair("enabled", if enabled { "true" } else { "false" });
        let response = self.send(Method::POST, url, None).await?;
        require_success(&response)
    }

    async fn post_test(&self, config: &CrawlTargetConfig) -> Result<TestOutcome, GatewayError> {
        let url = self.endpoint(TEST_PATH)?;
        let body = wire::encode_config(config).map_err(json_error)?;
        let response = self.send(Method::POST, url, Some(body)).await?;
        if response.status.is_success() {
            return Ok(wire::decode_test_success(&response.body));
        }
        Ok(match wire::decode_messages(&response.body) {
            Some(messages) => TestOutcome::ValidationFailure(messages),
            None => TestOutcome::GenericFailure,
        })
    }
}

fn require_success(response: &RawResponse) -> Result<(), GatewayError> {
    if response.status.is_success() {
        Ok(())
    } else {
        Err(GatewayError::new(
            FailureKind::HttpStatus(response.status.as_u16()),
            response.status.to_string(),
        ))
    }
}

fn json_error(err: serde_json::Error) -> GatewayError {
    GatewayError::new(FailureKind::Json, err.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::new(FailureKind::Timeout, err.to_string());
    }
    GatewayError::new(FailureKind::Network, err.to_string())
}
