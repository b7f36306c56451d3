//! Shared test utilities for creating test environments.
//!
//! This module is only compiled when running tests (`#[cfg(test)]`).

use crate::{Config, Session};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment that sets up a billed home directory with a Config and a connected employee.
/// Holds TempDir to keep the directory alive for the duration of the test.
pub struct TestEnv {
    temp_dir: TempDir,
    config: Config,
}

impl TestEnv {
    /// Creates a test environment for the employee `employee@test.tld`.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("billed");
        let session = Session::employee("employee@test.tld").with_jwt("test-jwt");
        let config = Config::create(&root, "http://localhost:5678", &session)
            .await
            .unwrap();

        Self {
            temp_dir,
            config,
        }
    }

    /// Returns a clone of the Config.
    pub fn config(&self) -> Config {
        self.config.clone()
    }

    /// Writes `content` to a file named `name` outside of the home directory and returns its path.
    pub async fn write_file(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        tokio::fs::write(&path, content).await.unwrap();
        path
    }
}
