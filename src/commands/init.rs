use crate::commands::Out;
use crate::{Config, Result, Session};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and:
/// - Creates an initial `config.json` file using `api_url`
/// - Writes `session` to `session.json`, making it the connected user for subsequent commands
///
/// # Arguments
/// - `billed_home` - The directory that will be the root of the home directory, e.g.
///   `$HOME/billed`
/// - `session` - The connected user.
/// - `api_url` - The base URL of the bills API, e.g. `http://localhost:5678`
///
/// # Errors
/// - Returns an error if `api_url` is not a URL or if any file operations fail.
pub async fn init(billed_home: &Path, session: &Session, api_url: &str) -> Result<Out<()>> {
    let config = Config::create(billed_home, api_url, session)
        .await
        .context("Unable to create the home directory and configs")?;
    Ok(format!(
        "Successfully created the billed directory at '{}' for {}",
        config.root().display(),
        session.email()
    )
    .into())
}
