//! JSON shapes exchanged with the crawler backend.
//!
//! Outbound configs carry `keywords` as a list; inbound configs may carry it
//! as a list or as text, and any field may be missing, null or mistyped.

use std::collections::BTreeMap;

use crawler_admin_core::{
    keywords_to_list, keywords_to_text, CrawlTargetConfig, TestOutcome, WireErrorPayload,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireConfig<'a> {
    pub url: &'a str,
    pub keywords: Vec<String>,
    pub link_selector: &'a str,
    pub title_selector: &'a str,
    pub date_selector: &'a str,
    pub content_selector: &'a str,
    pub url_prefix: &'a str,
}

impl<'a> From<&'a CrawlTargetConfig> for WireConfig<'a> {
    fn from(config: &'a CrawlTargetConfig) -> Self {
        Self {
            url: &config.url,
            keywords: keywords_to_list(&config.keywords),
            link_selector: &config.link_selector,
            title_selector: &config.title_selector,
            date_selector: &config.date_selector,
            content_selector: &config.content_selector,
            url_prefix: &config.url_prefix,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredConfig {
    #[serde(deserialize_with = "lenient_string")]
    url: Option<String>,
    #[serde(deserialize_with = "lenient_keywords")]
    keywords: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    link_selector: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    title_selector: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    date_selector: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    content_selector: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    url_prefix: Option<String>,
}

impl From<StoredConfig> for CrawlTargetConfig {
    fn from(stored: StoredConfig) -> Self {
        Self {
            url: stored.url.unwrap_or_default(),
            keywords: stored.keywords.unwrap_or_default(),
            link_selector: stored.link_selector.unwrap_or_default(),
            title_selector: stored.title_selector.unwrap_or_default(),
            date_selector: stored.date_selector.unwrap_or_default(),
            content_selector: stored.content_selector.unwrap_or_default(),
            url_prefix: stored.url_prefix.unwrap_or_default(),
        }
    }
}

/// Anything but a JSON string reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Keywords arrive as text or as a list; non-string list items are skipped.
fn lenient_keywords<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Array(items) => Some(keywords_to_text(&strings_only(items))),
        _ => None,
    })
}

fn strings_only(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Keeps the entries whose message is a string.
fn string_messages(raw: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    raw.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(message) => Some((key, message)),
            _ => None,
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigsEnvelope {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(default)]
        data: Option<Vec<Value>>,
    },
}

#[derive(Debug, Deserialize)]
struct SchedulerStatus {
    #[serde(default)]
    enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct MessagesBody {
    #[serde(default)]
    messages: Option<BTreeMap<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TestResponse {
    Rows(Vec<Value>),
    Messages { messages: BTreeMap<String, Value> },
    Other(Value),
}

pub fn encode_configs(configs: &[CrawlTargetConfig]) -> serde_json::Result<Vec<u8>> {
    let wire: Vec<WireConfig<'_>> = configs.iter().map(WireConfig::from).collect();
    serde_json::to_vec(&wire)
}

pub fn encode_config(config: &CrawlTargetConfig) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&WireConfig::from(config))
}

/// Accepts a bare array or `{"data": [...]}`; a wrapper without a `data`
/// array reads as no configs. An item that is not an object still takes
/// its slot, as a blank config, so positions match the backend's.
pub fn decode_configs(body: &[u8]) -> serde_json::Result<Vec<CrawlTargetConfig>> {
    let items = match serde_json::from_slice::<ConfigsEnvelope>(body)? {
        ConfigsEnvelope::Bare(list) => list,
        ConfigsEnvelope::Wrapped { data } => data.unwrap_or_default(),
    };
    Ok(items.into_iter().map(stored_config).collect())
}

fn stored_config(item: Value) -> CrawlTargetConfig {
    serde_json::from_value::<StoredConfig>(item)
        .unwrap_or_default()
        .into()
}

pub fn decode_scheduler(body: &[u8]) -> serde_json::Result<bool> {
    let status: SchedulerStatus = serde_json::from_slice(body)?;
    Ok(status.enabled.unwrap_or(false))
}

/// The `messages` map of an error body, if the body has one.
pub fn decode_messages(body: &[u8]) -> Option<WireErrorPayload> {
    serde_json::from_slice::<MessagesBody>(body)
        .ok()
        .and_then(|body| body.messages)
        .map(string_messages)
}

/// Interprets the body of a successful test call.
pub fn decode_test_success(body: &[u8]) -> TestOutcome {
    match serde_json::from_slice::<TestResponse>(body) {
        Ok(TestResponse::Rows(rows)) => TestOutcome::Sample(rows),
        Ok(TestResponse::Messages { messages }) => {
            TestOutcome::ValidationFailure(string_messages(messages))
        }
        Ok(TestResponse::Other(_)) | Err(_) => TestOutcome::GenericFailure,
    }
}
