use std::{env, fmt, sync::Arc};

use thiserror::Error;
use tracing::Span;

use crate::{model::TimestampCodec, transport::HttpExecutor};

pub const API_URL: &str = "https://api.modulbank.ru";

pub const TOKEN_VARIABLE: &str = "MODULBANK_TOKEN";
pub const SANDBOX_VARIABLE: &str = "MODULBANK_SANDBOX";
pub const BASE_URL_VARIABLE: &str = "MODULBANK_BASE_URL";

/// Settings a [`crate::Client`] is built from.
///
/// Anything left as `None` falls back to a default when the client is
/// constructed: a plain `reqwest` executor, a `bank_client` span and
/// [`API_URL`].
#[derive(Clone, Default)]
pub struct ClientOptions {
    pub executor: Option<Arc<dyn HttpExecutor + Send + Sync>>,
    /// Ignored in sandbox mode.
    pub token: String,
    pub sandbox: bool,
    pub span: Option<Span>,
    pub timestamps: TimestampCodec,
    pub base_url: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("{0} must be set unless sandbox mode is enabled")]
    MissingToken(&'static str),
}

impl ClientOptions {
    pub fn from_env() -> Result<Self, OptionsError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads the settings through `lookup` instead of the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OptionsError> {
        let sandbox = lookup(SANDBOX_VARIABLE)
            .map(|value| is_enabled(&value))
            .unwrap_or(false);
        let token = match lookup(TOKEN_VARIABLE).filter(|token| !token.is_empty()) {
            Some(token) => token,
            None if sandbox => String::new(),
            None => return Err(OptionsError::MissingToken(TOKEN_VARIABLE)),
        };
        Ok(Self {
            token,
            sandbox,
            base_url: lookup(BASE_URL_VARIABLE).filter(|url| !url.is_empty()),
            ..Default::default()
        })
    }
}

fn is_enabled(value: &str) -> bool {
    ["1", "true", "on", "yes"]
        .iter()
        .any(|enabled| enabled.eq_ignore_ascii_case(value.trim()))
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("executor", &self.executor.as_ref().map(|_| "<custom>"))
            .field("token", &"<redacted>")
            .field("sandbox", &self.sandbox)
            .field("span", &self.span)
            .field("timestamps", &self.timestamps)
            .field("base_url", &self.base_url)
            .finish()
    }
}
