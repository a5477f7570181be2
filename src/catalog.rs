//! Destination Catalog
//!
//! Loads destination records from a JSON fixture file, falling back to the
//! built-in set when the file is missing or unreadable.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::PlannerError;
use crate::models::Destination;

const EMBEDDED_DESTINATIONS: &str = include_str!("data/destinations.json");

/// Where the loaded records came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Embedded,
}

/// Read-only list of destination records
#[derive(Debug, Clone)]
pub struct DestinationCatalog {
    destinations: Vec<Destination>,
    source: CatalogSource,
}

impl DestinationCatalog {
    /// Load from `path` if given, otherwise (or on failure) use the built-in set
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("No destinations file configured, using built-in destinations");
            return Self::embedded();
        };

        match Self::from_file(path) {
            Ok(catalog) => {
                info!(
                    "Loaded {} destinations from {}",
                    catalog.len(),
                    path.display()
                );
                catalog
            }
            Err(e) => {
                warn!(
                    "Destinations file {} unusable ({}), using built-in destinations",
                    path.display(),
                    e
                );
                Self::embedded()
            }
        }
    }

    /// Load records from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, PlannerError> {
        let text = std::fs::read_to_string(path)?;
        let destinations = Self::parse(&text)?;
        Ok(Self {
            destinations,
            source: CatalogSource::File(path.to_path_buf()),
        })
    }

    /// The built-in destination set
    #[must_use]
    pub fn embedded() -> Self {
        let destinations = Self::parse(EMBEDDED_DESTINATIONS).unwrap_or_else(|e| {
            warn!("Built-in destinations could not be parsed: {}", e);
            Vec::new()
        });
        Self {
            destinations,
            source: CatalogSource::Embedded,
        }
    }

    /// Parse a JSON array of destination records.
    ///
    /// The document must be an array; individual records that do not match the
    /// expected shape are skipped with a warning.
    pub fn parse(text: &str) -> Result<Vec<Destination>, PlannerError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| PlannerError::catalog(format!("invalid JSON: {e}")))?;
        let Value::Array(records) = value else {
            return Err(PlannerError::catalog(
                "expected a JSON array of destinations",
            ));
        };

        let destinations = records
            .into_iter()
            .enumerate()
            .filter_map(
                |(index, record)| match serde_json::from_value::<Destination>(record) {
                    Ok(dest) => Some(dest),
                    Err(e) => {
                        warn!("Skipping destination record {}: {}", index, e);
                        None
                    }
                },
            )
            .collect();

        Ok(destinations)
    }

    #[must_use]
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
