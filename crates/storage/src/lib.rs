//! JSON-backed catalog and config loading.
//!
//! Nothing is written back: the catalog is static input and the config file
//! is only ever read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bookconnect_core::{Catalog, CatalogError, CatalogSource, Settings};
use thiserror::Error;

/// Dataset shipped inside the binary.
pub const DEFAULT_CATALOG_JSON: &str = include_str!("../data/catalog.json");

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse {what}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid catalog data")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone)]
pub struct Storage {
    config_path: PathBuf,
}

impl Storage {
    pub fn open(config_path: impl AsRef<Path>) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Missing config file means defaults.
    pub fn load_settings(&self) -> Result<Settings, StorageError> {
        let raw = match fs::read_to_string(&self.config_path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.config_path.display(), "no config file, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.config_path.clone(),
                    source,
                });
            }
        };

        let mut settings: Settings =
            serde_json::from_str(&raw).map_err(|source| StorageError::Parse {
                what: self.config_path.display().to_string(),
                source,
            })?;
        settings.normalize();
        Ok(settings)
    }

    /// Loads the catalog named by `settings`, or the bundled one.
    pub fn load_catalog(&self, settings: &Settings) -> Result<Catalog, StorageError> {
        match settings.catalog_path.as_deref() {
            Some(path) => load_catalog_file(path),
            None => default_catalog(),
        }
    }
}

pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<Catalog, StorageError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(&raw, &path.display().to_string())?;
    tracing::info!(path = %path.display(), books = catalog.len(), "loaded catalog");
    Ok(catalog)
}

pub fn default_catalog() -> Result<Catalog, StorageError> {
    let catalog = parse_catalog(DEFAULT_CATALOG_JSON, "bundled catalog")?;
    tracing::info!(books = catalog.len(), "loaded bundled catalog");
    Ok(catalog)
}

pub fn parse_catalog(raw: &str, what: &str) -> Result<Catalog, StorageError> {
    let source: CatalogSource = serde_json::from_str(raw).map_err(|source| StorageError::Parse {
        what: what.to_string(),
        source,
    })?;
    Ok(source.into_catalog()?)
}
