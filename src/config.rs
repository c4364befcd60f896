//! Configuration management and validation.
//!
//! Provides configuration structures for ingestion behaviour and the column
//! layout of raw route lines, with TOML loading and layered defaults.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, ROUTE_RECORD_LENGTH};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Batch ingestion behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Stop reading at the first blank (or whitespace-only) line
    pub blank_line_terminates: bool,

    /// Remove every double quote character before splitting a line
    pub strip_quotes: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            blank_line_terminates: true,
            strip_quotes: true,
        }
    }
}

/// Column positions of the OpenFlights routes.dat layout
///
/// A full route line carries airline, airline id, source airport, source
/// airport id, destination airport, destination airport id, codeshare, stops
/// and equipment. The short shape omits the trailing equipment column, which
/// then reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteLayout {
    /// Number of columns in a full line
    pub full_length: usize,

    /// Number of columns in a line without the equipment column
    pub short_length: usize,

    pub airline: usize,
    pub source_airport: usize,
    pub destination_airport: usize,
    pub codeshare: usize,
    pub stops: usize,
    pub equipment: usize,
}

impl Default for RouteLayout {
    fn default() -> Self {
        Self {
            full_length: ROUTE_RECORD_LENGTH,
            short_length: ROUTE_RECORD_LENGTH - 1,
            airline: 0,
            source_airport: 2,
            destination_airport: 4,
            codeshare: 6,
            stops: 7,
            equipment: 8,
        }
    }
}

impl RouteLayout {
    /// Check that every column index fits the declared shapes
    pub fn validate(&self) -> Result<()> {
        if self.full_length == 0 {
            return Err(Error::configuration(
                "Route layout full_length must be greater than 0",
            ));
        }

        if self.short_length + 1 != self.full_length {
            return Err(Error::configuration(format!(
                "Route layout short_length ({}) must be one less than full_length ({})",
                self.short_length, self.full_length
            )));
        }

        if self.equipment != self.full_length - 1 {
            return Err(Error::configuration(format!(
                "Route layout equipment column ({}) must be the last column ({})",
                self.equipment,
                self.full_length - 1
            )));
        }

        let columns = [
            ("airline", self.airline),
            ("source_airport", self.source_airport),
            ("destination_airport", self.destination_airport),
            ("codeshare", self.codeshare),
            ("stops", self.stops),
        ];
        for (name, index) in columns {
            if index >= self.short_length {
                return Err(Error::configuration(format!(
                    "Route layout column {} ({}) is outside a {}-column line",
                    name, index, self.short_length
                )));
            }
        }

        Ok(())
    }
}

/// Global configuration for ingestion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Batch ingestion settings
    pub ingest: IngestConfig,

    /// Raw route column layout
    pub route_layout: RouteLayout,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::config_parse(path.display().to_string(), e))?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load an explicit file, else the user config file if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(default_path) if default_path.exists() => Self::load(&default_path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Location of the per-user configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Validate all sections
    pub fn validate(&self) -> Result<()> {
        self.route_layout.validate()
    }

    /// Replace the route layout
    pub fn with_route_layout(mut self, layout: RouteLayout) -> Self {
        self.route_layout = layout;
        self
    }

    /// Keep reading past blank lines instead of stopping
    pub fn without_blank_line_termination(mut self) -> Self {
        self.ingest.blank_line_terminates = false;
        self
    }

    /// Keep double quote characters in field values
    pub fn without_quote_stripping(mut self) -> Self {
        self.ingest.strip_quotes = false;
        self
    }
}
