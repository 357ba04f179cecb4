//! Command implementations.
//!
//! Every command builds an [`App`], drives one page controller and prints
//! whatever notices the controller pushed.

pub mod catalog;
pub mod podcasts;
pub mod requests;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;

use thiserror::Error;

use stitchhouse_admin::PanelError;
use stitchhouse_api::{
    ApiClient, ApiError, ClientConfig, ConfigError, NoticeLevel, Notices, Session,
    SessionContext, SessionStore,
};
use stitchhouse_storefront::FormError;

/// Errors that end a command with exit code 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error("Not signed in. Run `stitch session login` or set STITCHHOUSE_API_TOKEN")]
    NotSignedIn,

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

/// Everything a command needs.
pub struct App {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub store: SessionStore,
    pub session: SessionContext,
    pub notices: Notices,
}

impl App {
    /// Build the client and restore the stored session, if any.
    pub async fn init(config: ClientConfig) -> Result<Self, CliError> {
        let api = ApiClient::new(&config)?;
        let store = SessionStore::new(
            config
                .session_file
                .clone()
                .unwrap_or_else(default_session_file),
        );

        let mut session = SessionContext::new();
        if let Some(stored) = store.load().await? {
            session.sign_in(stored);
        }

        Ok(Self {
            config,
            api,
            store,
            session,
            notices: Notices::new(),
        })
    }

    /// The signed-in session, authenticating `STITCHHOUSE_API_TOKEN` on
    /// demand when nothing is stored.
    pub async fn ensure_session(&mut self) -> Result<&Session, CliError> {
        if self.session.current().is_none() {
            let Some(token) = self.config.api_token.clone() else {
                return Err(CliError::NotSignedIn);
            };
            let session = self.api.authenticate(token).await?;
            self.session.sign_in(session);
        }
        self.session.current().ok_or(CliError::NotSignedIn)
    }

    /// Print and discard pending notices.
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    pub fn flush_notices(&mut self) {
        for notice in self.notices.drain() {
            match notice.level {
                NoticeLevel::Success => println!("✓ {}", notice.message),
                NoticeLevel::Info => println!("  {}", notice.message),
                NoticeLevel::Error => eprintln!("✗ {}", notice.message),
            }
        }
    }
}

fn default_session_file() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".stitchhouse-session.json"),
        |home| PathBuf::from(home).join(".config/stitchhouse/session.json"),
    )
}
