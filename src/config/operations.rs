//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::catalog::{Catalog, CatalogSource};
use crate::error::{FlipflopError, Result};
use crate::render::RenderOptions;
use std::collections::HashSet;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(FlipflopError::UserError)` - Read/parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            FlipflopError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| FlipflopError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            FlipflopError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `field_order` entries must be non-empty and unique
    /// - `default_classifications` must not be empty
    /// - `history_size` must be positive
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for id in &self.field_order {
            if id.as_str().trim().is_empty() {
                return Err(FlipflopError::UserError(
                    "config validation failed: field_order entries must be non-empty".to_string(),
                ));
            }
            if !seen.insert(id.as_str()) {
                return Err(FlipflopError::UserError(format!(
                    "config validation failed: field_order lists '{}' more than once",
                    id
                )));
            }
        }

        if self.default_classifications.is_empty() {
            return Err(FlipflopError::UserError(
                "config validation failed: default_classifications must not be empty".to_string(),
            ));
        }

        if self.history_size == 0 {
            return Err(FlipflopError::UserError(
                "config validation failed: history_size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Rendering parameters derived from this config.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            field_order: self.field_order.clone(),
            tag_separator: self.tag_separator.clone(),
            field_separator: self.field_separator.clone(),
        }
    }

    /// Catalog sources in load order: built-in first (if enabled), then the
    /// configured files, then `extra`.
    pub fn catalog_sources<P: AsRef<Path>>(&self, extra: &[P]) -> Result<Vec<CatalogSource>> {
        let mut sources = Vec::new();
        if self.include_builtin_snippets {
            sources.push(CatalogSource::builtin());
        }
        for path in &self.snippet_sources {
            sources.push(CatalogSource::from_path(path)?);
        }
        for path in extra {
            sources.push(CatalogSource::from_path(path)?);
        }
        Ok(sources)
    }

    /// Load the catalog described by this config plus `extra` source files.
    pub fn load_catalog<P: AsRef<Path>>(&self, extra: &[P]) -> Result<Catalog> {
        Catalog::load(&self.catalog_sources(extra)?)
    }
}
