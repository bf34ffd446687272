use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Field name to message, for one record. Keys are stored verbatim, including
/// names that are not a [`ConfigField`].
pub type FieldErrors = BTreeMap<String, String>;

/// One crawl target as the operator edits it.
///
/// `keywords` is newline-delimited free text here; it only becomes a list on
/// the wire (see [`crate::keywords_to_list`]).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrawlTargetConfig {
    pub url: String,
    pub keywords: String,
    pub link_selector: String,
    pub title_selector: String,
    pub date_selector: String,
    pub content_selector: String,
    pub url_prefix: String,
}

impl CrawlTargetConfig {
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::Url => &self.url,
            ConfigField::Keywords => &self.keywords,
            ConfigField::LinkSelector => &self.link_selector,
            ConfigField::TitleSelector => &self.title_selector,
            ConfigField::DateSelector => &self.date_selector,
            ConfigField::ContentSelector => &self.content_selector,
            ConfigField::UrlPrefix => &self.url_prefix,
        }
    }

    pub fn set(&mut self, field: ConfigField, value: impl Into<String>) {
        let slot = match field {
            ConfigField::Url => &mut self.url,
            ConfigField::Keywords => &mut self.keywords,
            ConfigField::LinkSelector => &mut self.link_selector,
            ConfigField::TitleSelector => &mut self.title_selector,
            ConfigField::DateSelector => &mut self.date_selector,
            ConfigField::ContentSelector => &mut self.content_selector,
            ConfigField::UrlPrefix => &mut self.url_prefix,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigField {
    Url,
    Keywords,
    LinkSelector,
    TitleSelector,
    DateSelector,
    ContentSelector,
    UrlPrefix,
}

impl ConfigField {
    pub const ALL: [ConfigField; 7] = [
        ConfigField::Url,
        ConfigField::Keywords,
        ConfigField::LinkSelector,
        ConfigField::TitleSelector,
        ConfigField::DateSelector,
        ConfigField::ContentSelector,
        ConfigField::UrlPrefix,
    ];

    /// Wire name of the field, also used as the key in [`FieldErrors`].
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigField::Url => "url",
            ConfigField::Keywords => "keywords",
            ConfigField::LinkSelector => "linkSelector",
            ConfigField::TitleSelector => "titleSelector",
            ConfigField::DateSelector => "dateSelector",
            ConfigField::ContentSelector => "contentSelector",
            ConfigField::UrlPrefix => "urlPrefix",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown field {:?}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for ConfigField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
