pub mod types;

pub use types::{CookieConfig, GithubConfig, LanguageConfig, SiteConfig, TemplatesConfig};

use crate::error::{ChromeError, Result};
use std::path::Path;
use tracing::debug;

/// Longest cookie lifetime accepted from configuration, in days.
pub const MAX_COOKIE_DAYS: i64 = 36_500;

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading site configuration");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SiteConfig =
            toml::from_str(content).map_err(|e| ChromeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the widgets rely on. Called by [`Self::from_toml`];
    /// call it again after overriding fields by hand.
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(ChromeError::Config("no languages configured".to_string()));
        }
        for (i, lang) in self.languages.iter().enumerate() {
            if lang.id.is_empty() || lang.id.contains(char::is_whitespace) || lang.id.contains('-') {
                return Err(ChromeError::Config(format!(
                    "invalid language id {:?}: ids must be non-empty without whitespace or '-'",
                    lang.id
                )));
            }
            if self.languages[..i].iter().any(|l| l.id == lang.id) {
                return Err(ChromeError::Config(format!("duplicate language id {:?}", lang.id)));
            }
        }
        if self.cookie.name.is_empty() {
            return Err(ChromeError::Config("cookie name must not be empty".to_string()));
        }
        if !(0..=MAX_COOKIE_DAYS).contains(&self.cookie.expires_days) {
            return Err(ChromeError::Config(format!(
                "cookie expires_days must be between 0 and {}, got {}",
                MAX_COOKIE_DAYS, self.cookie.expires_days
            )));
        }
        if self.github.commit_limit == 0 {
            return Err(ChromeError::Config("github commit_limit must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn repo_for(&self, language: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| l.id == language)
            .and_then(|l| l.repo.as_deref())
    }
}
