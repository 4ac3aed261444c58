// src/dataset.rs
use crate::errors::LoadError;
use crate::timeline_event::{EventId, EventLink, TimelineEvent};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// Where the episode dataset lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    File(PathBuf),
    Url(Url),
}

impl DatasetSource {
    pub fn parse(input: &str) -> Result<Self, LoadError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(LoadError::InvalidSource("empty dataset location".to_string()));
        }

        let lower = trimmed.to_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(trimmed).map_err(|parse_err| {
                LoadError::InvalidSource(format!("Invalid URL '{}': {}", trimmed, parse_err))
            })?;
            return Ok(DatasetSource::Url(url));
        }

        if let Some((scheme, _)) = trimmed.split_once("://") {
            return Err(LoadError::InvalidSource(format!(
                "Unsupported scheme '{}' in '{}'. Only http/https or a file path.",
                scheme, trimmed
            )));
        }

        Ok(DatasetSource::File(PathBuf::from(trimmed)))
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::File(path) => write!(f, "{}", path.display()),
            DatasetSource::Url(url) => write!(f, "{}", url),
        }
    }
}

// ===== fetcher
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    async fn fetch(&self, source: &DatasetSource) -> Result<String, LoadError>;
}

// ===== Live fetcher: local files and http(s)
pub struct LiveDatasetFetcher {
    client: Client,
}

impl LiveDatasetFetcher {
    pub fn new() -> Self {
        const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client ({}), falling back to defaults", e);
                Client::new()
            });
        Self { client }
    }
}

impl Default for LiveDatasetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetFetcher for LiveDatasetFetcher {
    async fn fetch(&self, source: &DatasetSource) -> Result<String, LoadError> {
        match source {
            DatasetSource::File(path) => {
                info!("LiveDatasetFetcher: reading {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
            DatasetSource::Url(url) => {
                info!("LiveDatasetFetcher: fetching {}", url);
                let response = self.client.get(url.as_str()).send().await?.error_for_status()?;
                Ok(response.text().await?)
            }
        }
    }
}

// ===== Fake fetcher for testing
pub struct FakeFetcher {
    pub response: String,
}

#[async_trait]
impl DatasetFetcher for FakeFetcher {
    async fn fetch(&self, _source: &DatasetSource) -> Result<String, LoadError> {
        Ok(self.response.clone())
    }
}

// ===== JSON shape of the dataset

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    director: String,
    date: String,
    episode_date: String,
    #[serde(default)]
    episode_number: Option<serde_json::Value>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    links: Option<Vec<RawLink>>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    url: String,
    #[serde(default)]
    text: String,
}

/// Accepts `YYYY-MM-DD`, RFC 3339, or a zone-less `YYYY-MM-DDTHH:MM:SS` (read as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok().map(|dt| dt.and_utc())
}

fn episode_number_text(value: Option<serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl RawEvent {
    fn into_event(self) -> Result<TimelineEvent, LoadError> {
        let date = parse_timestamp(&self.date).ok_or_else(|| LoadError::InvalidDate {
            id: self.id,
            field: "date",
            value: self.date.clone(),
        })?;
        let episode_date =
            parse_timestamp(&self.episode_date).ok_or_else(|| LoadError::InvalidDate {
                id: self.id,
                field: "episodeDate",
                value: self.episode_date.clone(),
            })?;

        let links = self
            .links
            .unwrap_or_default()
            .into_iter()
            .map(|link| EventLink { url: link.url, text: link.text })
            .collect();

        Ok(TimelineEvent::new(
            EventId::new(self.id),
            self.title,
            self.description.unwrap_or_default(),
            self.content.unwrap_or_default(),
            self.director,
            date,
            episode_date,
            episode_number_text(self.episode_number),
            self.tags.unwrap_or_default(),
            links,
        ))
    }
}

/// Parses the whole dataset or nothing. The result is sorted by film date, ties by id.
pub fn parse_dataset(json: &str) -> Result<Vec<TimelineEvent>, LoadError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(LoadError::NotAnArray);
    }
    let raw_events: Vec<RawEvent> = serde_json::from_value(value)?;

    let mut seen: HashSet<i64> = HashSet::new();
    let mut events: Vec<TimelineEvent> = Vec::with_capacity(raw_events.len());
    for raw in raw_events {
        if !seen.insert(raw.id) {
            return Err(LoadError::DuplicateId(raw.id));
        }
        events.push(raw.into_event()?);
    }

    events.sort_by(|a, b| a.date().cmp(&b.date()).then(a.id().cmp(&b.id())));
    debug!("parse_dataset: {} events parsed", events.len());
    Ok(events)
}

pub async fn load_dataset(
    source: &DatasetSource,
    fetcher: &(dyn DatasetFetcher + Send + Sync),
) -> Result<Vec<TimelineEvent>, LoadError> {
    info!("load_dataset: Fetching dataset from {}", source);
    let content: String = fetcher.fetch(source).await?;
    info!("load_dataset: Content fetched, length: {}", content.len());
    parse_dataset(&content)
}
