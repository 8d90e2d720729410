use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

/// What a server offers, as read from a YAML file.
///
/// ```yaml
/// default_accept: "text/html, */*;q=0.1"
/// served_types:
///   - application/json
///   - text/html
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content types the server can produce, in preference order
    pub served_types: Vec<String>,
    /// Header used when none is supplied
    pub default_accept: Option<String>,
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        // a document with no content at all is null, not a mapping
        let cfg: Option<Self> = serde_yaml::from_str(yaml).context("invalid config")?;
        Ok(cfg.unwrap_or_default())
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml_str(&yaml).with_context(|| format!("in {}", path.display()))
    }
}
