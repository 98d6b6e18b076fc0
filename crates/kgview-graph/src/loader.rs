//! Dataset loading.
//!
//! The export is read exactly once per session, from a local path or over
//! HTTP. Any failure here is fatal: a fetch failure becomes
//! [`Error::Fetch`], and a body that is not a non-empty JSON array becomes
//! [`Error::MalformedInput`]. Individual records are not inspected; that is
//! the builder's job.

use kgview_core::{Error, Result, SourceConfig};
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

/// Where the export lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    /// A local file.
    Path(PathBuf),
    /// An HTTP(S) URL.
    Url(Url),
}

impl DataSource {
    /// Resolves a location, joining relative ones onto `base_url` if given.
    pub fn resolve(location: &str, base_url: Option<&str>) -> Result<Self> {
        if let Some(url) = parse_http_url(location) {
            return Ok(Self::Url(url));
        }

        match base_url {
            Some(base) => {
                let base = Url::parse(base)
                    .map_err(|e| Error::config(format!("Invalid base_url '{base}': {e}")))?;
                let joined = base.join(location).map_err(|e| {
                    Error::config(format!("Cannot resolve '{location}' against {base}: {e}"))
                })?;
                Ok(Self::Url(joined))
            }
            None => Ok(Self::Path(PathBuf::from(location))),
        }
    }

    /// Resolves the source section of a viewer configuration.
    pub fn from_config(source: &SourceConfig) -> Result<Self> {
        Self::resolve(&source.data, source.base_url.as_deref())
    }

    /// Reads the raw body.
    pub async fn fetch_text(&self) -> Result<String> {
        match self {
            Self::Path(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| Error::fetch(self.to_string(), e.to_string())),
            Self::Url(url) => {
                let response = reqwest::get(url.clone())
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| Error::fetch(self.to_string(), e.to_string()))?;
                response
                    .text()
                    .await
                    .map_err(|e| Error::fetch(self.to_string(), e.to_string()))
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

fn parse_http_url(location: &str) -> Option<Url> {
    Url::parse(location)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

/// Splits an export body into its records.
pub fn parse_records(text: &str) -> Result<Vec<Value>> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| Error::malformed(format!("invalid JSON: {e}")))?;

    match value {
        Value::Array(items) if items.is_empty() => Err(Error::malformed("empty array")),
        Value::Array(items) => Ok(items),
        other => Err(Error::malformed(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Fetches and splits the export.
pub async fn load_records(source: &DataSource) -> Result<Vec<Value>> {
    log::info!("Loading graph data from {source}");
    let text = source.fetch_text().await?;
    let records = parse_records(&text)?;
    log::debug!("Read {} records from {source}", records.len());
    Ok(records)
}

// ============================================================================
// Tests
// ============================================================================
