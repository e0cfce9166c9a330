//! Configuration loading and management

use crate::core::error::{ConfigError, ViewError};
use crate::core::record::{Column, Record};
use crate::core::sort::SortDirective;
use crate::core::view::{CollectionView, ViewConfig};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Overrides for one list screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// Column keys searched by the free-text box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_columns: Option<Vec<String>>,

    /// Directive applied when the screen opens, as `column[:asc|desc]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
}

/// Complete configuration of the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Base URL of the backend REST API (e.g. `http://localhost:8000/api/v1`)
    pub api_base_url: String,

    /// Per-screen overrides, keyed by screen name
    #[serde(default)]
    pub screens: HashMap<String, ScreenConfig>,
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message: e.to_string(),
            })?;
        config.validate()?;

        tracing::info!(path = %path.display(), screens = config.screens.len(), "config loaded");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url".to_string(),
                value: self.api_base_url.clone(),
                message: "expected an http(s) URL".to_string(),
            });
        }
        Ok(())
    }

    /// Merge multiple configurations into one
    ///
    /// Later configurations win: the last API base URL is kept and screen
    /// overrides are replaced field by field. An empty list yields
    /// [`ConsoleConfig::default_config`].
    pub fn merge(configs: Vec<ConsoleConfig>) -> Self {
        let mut configs = configs.into_iter();
        let Some(mut merged) = configs.next() else {
            return Self::default_config();
        };

        for config in configs {
            merged.api_base_url = config.api_base_url;
            for (name, screen) in config.screens {
                let entry = merged.screens.entry(name).or_default();
                if screen.search_columns.is_some() {
                    entry.search_columns = screen.search_columns;
                }
                if screen.default_sort.is_some() {
                    entry.default_sort = screen.default_sort;
                }
            }
        }
        merged
    }

    /// Build the view configuration of a screen
    ///
    /// Without an override, the record type's default searchable columns
    /// are used.
    pub fn view_config<T: Record>(&self, screen: &str) -> Result<ViewConfig<T::Column>, ViewError> {
        let Some(keys) = self
            .screens
            .get(screen)
            .and_then(|s| s.search_columns.as_ref())
        else {
            return Ok(ViewConfig::for_record::<T>());
        };

        if keys.is_empty() {
            return Err(ViewError::EmptySearchColumns {
                screen: screen.to_string(),
            });
        }

        let searchable = keys
            .iter()
            .map(|k| T::Column::parse(k))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ViewConfig::new(searchable))
    }

    /// Build an empty view for a screen, with its default sort applied
    pub fn view<T: Record>(&self, screen: &str) -> Result<CollectionView<T>, ViewError> {
        let mut view = CollectionView::with_config(self.view_config::<T>(screen)?);
        if let Some(sort) = self.screens.get(screen).and_then(|s| s.default_sort.as_deref()) {
            view.set_sort(SortDirective::parse(sort)?);
        }
        Ok(view)
    }

    /// Create a default configuration for local development
    pub fn default_config() -> Self {
        let mut screens = HashMap::new();
        screens.insert(
            "analyses".to_string(),
            ScreenConfig {
                search_columns: None,
                default_sort: Some("create_time:desc".to_string()),
            },
        );
        screens.insert(
            "videos".to_string(),
            ScreenConfig {
                search_columns: None,
                default_sort: Some("create_time:desc".to_string()),
            },
        );

        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            screens,
        }
    }
}
