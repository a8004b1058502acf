//! Apple Music section of the pmoconfig configuration
//!
//! All keys live under `accounts.applemusic`:
//!
//! ```yaml
//! accounts:
//!   applemusic:
//!     developer_token: "eyJ..."
//!     user_token: "Ap..."
//!     page_size: 10
//!     root_label: Apple Music
//!     albums_label: Albums
//! ```
//!
//! Every key can be overridden from the environment, e.g.
//! `PMOMUSIC_CONFIG__ACCOUNTS__APPLEMUSIC__USER_TOKEN`.

use anyhow::{Result, anyhow};
use pmoconfig::Config;
use serde_yaml::Value;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_ROOT_LABEL: &str = "Apple Music";
pub const DEFAULT_ALBUMS_LABEL: &str = "Albums";

const SECTION: [&str; 2] = ["accounts", "applemusic"];

/// Non-secret tunables of the catalog resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppleMusicSettings {
    /// Albums fetched for the collection listing
    pub page_size: u32,
    /// Name of the root directory ref
    pub root_label: String,
    /// Name of the album collection ref shown under the root
    pub albums_label: String,
}

impl Default for AppleMusicSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            albums_label: DEFAULT_ALBUMS_LABEL.to_string(),
        }
    }
}

/// Extension trait exposing the Apple Music settings of a [`Config`]
///
/// # Example
///
/// ```rust,ignore
/// use pmoapplemusic::AppleMusicConfigExt;
///
/// let config = pmoconfig::Config::load_config("")?;
/// let (developer, user) = config.get_applemusic_credentials()?;
/// ```
pub trait AppleMusicConfigExt {
    /// Developer token (JWT). Errors when missing or empty.
    fn get_applemusic_developer_token(&self) -> Result<String>;

    /// Music user token. Errors when missing or empty.
    fn get_applemusic_user_token(&self) -> Result<String>;

    /// `(developer_token, user_token)`
    fn get_applemusic_credentials(&self) -> Result<(String, String)>;

    fn get_applemusic_page_size(&self) -> u32;

    fn get_applemusic_root_label(&self) -> String;

    fn get_applemusic_albums_label(&self) -> String;

    /// Gathers page size and labels
    fn get_applemusic_settings(&self) -> AppleMusicSettings {
        AppleMusicSettings {
            page_size: self.get_applemusic_page_size(),
            root_label: self.get_applemusic_root_label(),
            albums_label: self.get_applemusic_albums_label(),
        }
    }
}

fn path(key: &str) -> [&str; 3] {
    [SECTION[0], SECTION[1], key]
}

fn required_string(config: &Config, key: &str) -> Result<String> {
    match config.get_value(&path(key)) {
        Ok(Value::String(s)) if !s.is_empty() => Ok(s),
        _ => Err(anyhow!("Apple Music {} not configured", key)),
    }
}

impl AppleMusicConfigExt for Config {
    fn get_applemusic_developer_token(&self) -> Result<String> {
        required_string(self, "developer_token")
    }

    fn get_applemusic_user_token(&self) -> Result<String> {
        required_string(self, "user_token")
    }

    fn get_applemusic_credentials(&self) -> Result<(String, String)> {
        let developer = self.get_applemusic_developer_token()?;
        let user = self.get_applemusic_user_token()?;
        Ok((developer, user))
    }

    fn get_applemusic_page_size(&self) -> u32 {
        self.get_u64(&path("page_size"))
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    fn get_applemusic_root_label(&self) -> String {
        self.get_string(&path("root_label"))
            .unwrap_or_else(|| DEFAULT_ROOT_LABEL.to_string())
    }

    fn get_applemusic_albums_label(&self) -> String {
        self.get_string(&path("albums_label"))
            .unwrap_or_else(|| DEFAULT_ALBUMS_LABEL.to_string())
    }
}
