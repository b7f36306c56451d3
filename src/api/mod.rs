//! The store client: the seam between the views/controllers and wherever bills are persisted.
//!
//! `Store::bills()` hands out the bills accessor. Two implementations exist: `HttpStore` talks to
//! the bills REST API, `MockStore` keeps everything in memory.

mod http_store;
mod mock_store;

use crate::model::{Bill, SelectedFile};
use crate::{Config, Result, Session};
use std::sync::Arc;
use tracing::debug;

pub use http_store::HttpStore;
pub use mock_store::{MockCalls, MockStore};

const TEST_MODE_ENV: &str = "BILLED_IN_TEST_MODE";

/// Operations on the bills resource.
#[async_trait::async_trait]
pub trait Bills: Send + Sync {
    /// Returns every bill visible to the connected user.
    async fn list(&self) -> Result<Vec<Bill>>;

    /// Stores a new bill along with its receipt. The returned bill carries the id assigned by the
    /// store and the URL where the receipt can be fetched.
    async fn create(&self, bill: &Bill, file: &SelectedFile) -> Result<Bill>;

    /// Replaces the stored bill that has the same id as `bill`.
    async fn update(&self, bill: &Bill) -> Result<Bill>;
}

/// A collection-like accessor over the remote persistence API.
pub trait Store: Send + Sync {
    fn bills(&self) -> &dyn Bills;
}

/// Whether the app talks to the real bills API or to the in-memory store.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    #[default]
    Api,
    Mock,
}

impl Mode {
    /// `Mode::Mock` when `BILLED_IN_TEST_MODE` is set to a non-empty value, `Mode::Api` otherwise.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Mock,
            _ => Mode::Api,
        }
    }
}

/// Creates the store for `mode`.
pub fn store(config: &Config, session: &Session, mode: Mode) -> Result<Arc<dyn Store>> {
    debug!("Creating the {mode:?} store");
    Ok(match mode {
        Mode::Api => Arc::new(HttpStore::new(config.api_url(), session.jwt())?),
        Mode::Mock => Arc::new(MockStore::with_fixtures()?),
    })
}
