//! Configuration file handling for billed.
//!
//! The configuration file is stored at `$BILLED_HOME/config.json` and holds the URL of the bills
//! API. The connected user is stored next to it in `$BILLED_HOME/session.json`.

use crate::session::Session;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "billed";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const SESSION_JSON: &str = "session.json";

/// The URL of the bills API when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5678";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$BILLED_HOME` and from there it loads `$BILLED_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    session_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and:
    /// - Creates an initial `config.json` file using `api_url`
    /// - Writes `session` to `session.json`
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the home directory, e.g. `$HOME/billed`
    /// - `api_url` - The base URL of the bills API, e.g. `http://localhost:5678`
    /// - `session` - The user that will be connected when running commands
    ///
    /// # Errors
    /// - Returns an error if `api_url` is not a URL or if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, api_url: &str, session: &Session) -> Result<Self> {
        url::Url::parse(api_url).with_context(|| format!("Invalid API URL '{api_url}'"))?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the billed home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: api_url.to_string(),
        };
        config_file.save(&config_path).await?;

        let session_path = root.join(SESSION_JSON);
        session
            .save(&session_path)
            .await
            .context("Unable to write the session file")?;

        Ok(Self {
            root,
            config_path,
            session_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `billed_home` exists and that the config file exists
    /// - load the config file
    /// - return the loaded configuration object
    pub async fn load(billed_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = billed_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Billed Home is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            session_path: root.join(SESSION_JSON),
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    pub fn api_url(&self) -> &str {
        &self.config_file.api_url
    }

    /// Reads the connected user from `session.json`.
    pub async fn session(&self) -> Result<Session> {
        if !self.session_path.is_file() {
            bail!(
                "No user is connected, the session file is missing '{}'",
                self.session_path.display()
            )
        }
        Session::load(&self.session_path).await
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "billed",
///   "config_version": 1,
///   "api_url": "http://localhost:5678"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "billed"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the bills API
    #[serde(default = "default_api_url")]
    api_url: String,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: default_api_url(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        utils::serialize(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }
}
