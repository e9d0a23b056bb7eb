//! Application context for the Huenote CLI.
//!
//! Bundles the parsed arguments with the config file, so handlers don't
//! re-read it or thread paths around.

use std::path::PathBuf;
use std::sync::Arc;

use huenote_core::storage::SqliteStore;
use huenote_core::{Algorithm, NoteCipher};

use crate::cli::Cli;
use crate::config::{read_config, HuenoteConfig};
use crate::errors::CliError;

use super::resolver::{missing_config_message, missing_store_message, resolve_config_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config_path: PathBuf,
    config: Option<HuenoteConfig>,
}

impl<'a> AppContext<'a> {
    /// Build the context, reading the config file if one exists.
    pub fn load(cli: &'a Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path()?;
        let config = if config_path.exists() {
            Some(read_config(&config_path)?)
        } else {
            None
        };
        Ok(Self {
            cli,
            config_path,
            config,
        })
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn has_config(&self) -> bool {
        self.config.is_some()
    }

    /// Log level from the config file.
    pub fn log_level(&self) -> Option<&str> {
        self.config.as_ref()?.log.level.as_deref()
    }

    /// Algorithm for new notes when `--algorithm` is not given.
    pub fn default_algorithm(&self) -> Algorithm {
        self.config
            .as_ref()
            .and_then(|config| config.notes.default_algorithm)
            .unwrap_or_default()
    }

    /// Store path from `--store`/`HUENOTE_STORE`, falling back to the config.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.store.as_ref() {
            return Ok(PathBuf::from(path));
        }
        match self.config.as_ref() {
            Some(config) => Ok(PathBuf::from(&config.store.path)),
            None => Err(CliError::not_found(
                missing_config_message(&self.config_path),
                "Hint: `huenote init` writes a config with the default store path.",
            )
            .into()),
        }
    }

    /// Open the existing store. Never creates one; that is `init`'s job.
    pub fn open_store(&self) -> anyhow::Result<Arc<SqliteStore>> {
        let path = self.store_path()?;
        if !path.exists() {
            return Err(CliError::not_found(
                missing_store_message(&path),
                "Hint: Check --store or the [store] path in your config.",
            )
            .into());
        }
        Ok(Arc::new(SqliteStore::open(&path)?))
    }

    /// Open the store together with a note service backed by it.
    pub fn open_notes(&self) -> anyhow::Result<(Arc<SqliteStore>, NoteCipher)> {
        let store = self.open_store()?;
        let notes = NoteCipher::new(store.clone());
        Ok((store, notes))
    }
}
