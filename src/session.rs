//! The connected user, as persisted in `$BILLED_HOME/session.json`.

use crate::{utils, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The kind of user that is connected. Only employees get the bills and new-bill navigation icons.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum UserType {
    #[default]
    #[serde(alias = "employee")]
    Employee,
    #[serde(alias = "admin")]
    Admin,
}

serde_plain::derive_display_from_serialize!(UserType);
serde_plain::derive_fromstr_from_deserialize!(UserType);

/// The connected user. This is read once by the app shell and handed to the router and
/// controllers; nothing in the view layer writes it.
///
/// Example `session.json`:
/// ```json
/// {
///   "type": "Employee",
///   "email": "employee@test.tld"
/// }
/// ```
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    user_type: UserType,
    #[serde(default)]
    email: String,
    /// Bearer token for the bills API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jwt: Option<String>,
}

impl Session {
    pub fn new(user_type: UserType, email: impl Into<String>) -> Self {
        Self {
            user_type,
            email: email.into(),
            jwt: None,
        }
    }

    pub fn employee(email: impl Into<String>) -> Self {
        Self::new(UserType::Employee, email)
    }

    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn jwt(&self) -> Option<&str> {
        self.jwt.as_deref()
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }

    pub(crate) async fn load(path: &Path) -> Result<Self> {
        utils::deserialize(path).await
    }

    pub(crate) async fn save(&self, path: &Path) -> Result<()> {
        utils::serialize(path, self).await
    }
}
