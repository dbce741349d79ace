//! Oracle configuration from environment variables

use std::{env, path::PathBuf};

use tracing::{info, warn};

use crate::{
    error::ProbeError,
    oracle::{AnyOracle, RemoteOracle, TableOracle},
};

const DEFAULT_SNAPSHOT: &str = "/tmp/tablebasestate.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleConfig {
    /// Base URL of a remote tablebase server. Takes precedence over the
    /// snapshot when set.
    pub remote_url: Option<String>,

    /// JSON snapshot restored into a [`TableOracle`]
    pub snapshot_path: PathBuf,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT),
        }
    }
}

impl OracleConfig {
    /// Load configuration from `TABLEBASE_URL` and `TABLEBASE_SNAPSHOT`.
    pub fn from_env() -> Self {
        let remote_url = env::var("TABLEBASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let snapshot_path = env::var("TABLEBASE_SNAPSHOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SNAPSHOT));

        Self {
            remote_url,
            snapshot_path,
        }
    }

    /// Build the configured oracle.
    ///
    /// A missing snapshot is not an error: the table starts empty and
    /// every probe answers `None`. A snapshot that exists but cannot be
    /// read is.
    pub fn open(&self) -> Result<AnyOracle, ProbeError> {
        if let Some(url) = &self.remote_url {
            info!(url = %url, "Using remote tablebase");
            return Ok(AnyOracle::Remote(RemoteOracle::new(url)?));
        }

        if !self.snapshot_path.exists() {
            warn!(
                path = %self.snapshot_path.display(),
                "No tablebase snapshot, every probe will miss"
            );
            return Ok(AnyOracle::Table(TableOracle::new()));
        }

        Ok(AnyOracle::Table(TableOracle::load(&self.snapshot_path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_snapshot_opens_empty_table() {
        let config = OracleConfig {
            remote_url: None,
            snapshot_path: PathBuf::from("/nonexistent/tablebase-verdict/state.json"),
        };

        match config.open().unwrap() {
            AnyOracle::Table(table) => assert!(table.is_empty()),
            other => panic!("expected table oracle, got {other:?}"),
        }
    }

    #[test]
    fn remote_takes_precedence() {
        let config = OracleConfig {
            remote_url: Some("http://localhost:5000/api".to_string()),
            ..OracleConfig::default()
        };

        match config.open().unwrap() {
            AnyOracle::Remote(remote) => assert_eq!(remote.base_url(), "http://localhost:5000/api"),
            other => panic!("expected remote oracle, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_snapshot_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "tablebase-verdict-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "{ not json").unwrap();

        let config = OracleConfig {
            remote_url: None,
            snapshot_path: path.clone(),
        };
        let result = config.open();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(ProbeError::Json(_))));
    }
}
