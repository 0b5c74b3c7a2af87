//! Persistence of the selected language.

use super::language::{Language, LanguageRegistry};
use crate::config::CookieConfig;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

/// Where the selected language id lives between page loads.
pub trait LanguageStore {
    fn load(&self) -> Option<String>;

    fn save(&mut self, language: &str);

    /// The stored language if the registry knows it, else the default.
    fn current<'r>(&self, registry: &'r LanguageRegistry) -> &'r Language {
        registry.resolve(self.load().as_deref())
    }
}

/// Cookie-backed store: reads the request's `Cookie` header and produces a
/// `Set-Cookie` value for the response.
#[derive(Debug, Clone)]
pub struct CookieStore {
    config: CookieConfig,
    value: Option<String>,
    saved: bool,
    expires: Option<DateTime<Utc>>,
}

impl CookieStore {
    pub fn new(config: CookieConfig) -> Self {
        Self {
            config,
            value: None,
            saved: false,
            expires: None,
        }
    }

    pub fn from_header(config: CookieConfig, header: &str) -> Self {
        let value = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == config.name)
            .map(|(_, value)| value.trim().trim_matches('"').to_string())
            .filter(|value| !value.is_empty());

        Self {
            config,
            value,
            saved: false,
            expires: None,
        }
    }

    /// Stores `language`, expiring `expires_days` after `now`. An expiry
    /// past the representable date range leaves a session cookie.
    pub fn save_at(&mut self, language: &str, now: DateTime<Utc>) {
        debug!(language, "persisting language");
        self.value = Some(language.to_string());
        self.saved = true;
        self.expires = Duration::try_days(self.config.expires_days).and_then(|d| now.checked_add_signed(d));
        if self.expires.is_none() {
            warn!(days = self.config.expires_days, "cookie expiry out of range, writing a session cookie");
        }
    }

    /// `name=value`, as the browser would send it back on the next request.
    pub fn cookie_pair(&self) -> Option<String> {
        self.value
            .as_ref()
            .map(|value| format!("{}={}", self.config.name, value))
    }

    /// The `Set-Cookie` header value for a language saved during this page
    /// load; `None` if nothing was saved.
    pub fn set_cookie_header(&self) -> Option<String> {
        if !self.saved {
            return None;
        }
        let pair = self.cookie_pair()?;
        Some(match self.expires {
            Some(expires) => format!(
                "{}; Expires={}; Path={}",
                pair,
                expires.format("%a, %d %b %Y %H:%M:%S GMT"),
                self.config.path
            ),
            None => format!("{}; Path={}", pair, self.config.path),
        })
    }
}

impl LanguageStore for CookieStore {
    fn load(&self) -> Option<String> {
        self.value.clone()
    }

    fn save(&mut self, language: &str) {
        self.save_at(language, Utc::now());
    }
}
