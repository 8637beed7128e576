//! Copy configuration

use serde::Deserialize;
use thiserror::Error;

/// Parameters as they arrive from flags, environment or file, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub original: Option<String>,

    #[serde(default)]
    pub new: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl RawConfig {
    /// Validate the required parameters, reporting every missing one at once
    pub fn validate(self) -> Result<CopyConfig, ConfigurationError> {
        let original = present(self.original);
        let new = present(self.new);
        let region = present(self.region);

        let missing: Vec<&'static str> = [
            ("original", original.is_none()),
            ("new", new.is_none()),
            ("region", region.is_none()),
        ]
        .into_iter()
        .filter_map(|(flag, absent)| absent.then_some(flag))
        .collect();

        match (original, new, region) {
            (Some(source_name), Some(destination_name), Some(region)) => Ok(CopyConfig {
                source_name,
                destination_name,
                region,
                endpoint_url: present(self.endpoint_url),
            }),
            _ => Err(ConfigurationError::Missing(missing)),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A validated, immutable copy request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyConfig {
    source_name: String,
    destination_name: String,
    region: String,
    endpoint_url: Option<String>,
}

impl CopyConfig {
    pub fn new(
        source_name: impl Into<String>,
        destination_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, ConfigurationError> {
        RawConfig {
            original: Some(source_name.into()),
            new: Some(destination_name.into()),
            region: Some(region.into()),
            endpoint_url: None,
        }
        .validate()
    }

    /// Point the client at a different service endpoint
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = present(Some(endpoint_url.into()));
        self
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn destination_name(&self) -> &str {
        &self.destination_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }
}

/// Configuration could not be resolved
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Required flags that were absent or empty, in declaration order
    #[error("following flags were not set: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("{0}")]
    Invocation(String),

    #[error("failed to load configuration: {0}")]
    Source(String),
}

impl ConfigurationError {
    pub fn missing(&self) -> &[&'static str] {
        match self {
            Self::Missing(flags) => flags,
            _ => &[],
        }
    }
}
