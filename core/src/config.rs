//! Connection settings for the remote note store.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const URL_VAR: &str = "NOTESTORE_URL";
pub const TOKEN_VAR: &str = "NOTESTORE_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStoreConfig {
    /// Base URL of the remote note store
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Authentication token sent with every call
    pub auth_token: String,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl NoteStoreConfig {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: auth_token.into(),
        }
    }

    /// Read `NOTESTORE_URL` (optional) and `NOTESTORE_TOKEN` (required).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let auth_token = lookup(TOKEN_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{TOKEN_VAR} is not set")))?;
        let base_url = lookup(URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(default_base_url);
        Ok(Self { base_url, auth_token })
    }
}
