use crate::github::adapter::ApiFlavor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub languages: Vec<LanguageConfig>,
    pub github: GithubConfig,
    pub cookie: CookieConfig,
    pub templates: TemplatesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub id: String,
    pub title: String,
    /// `owner/name` of the repository whose commits and tags belong to this language.
    #[serde(default)]
    pub repo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api: ApiFlavor,
    /// Overrides the API host; defaults to the flavor's host.
    pub base_uri: Option<String>,
    pub download_base: String,
    pub branch: String,
    pub commit_limit: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieConfig {
    pub name: String,
    pub expires_days: i64,
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub gitcommits: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let lang = |id: &str, title: &str, repo: &str| LanguageConfig {
            id: id.to_string(),
            title: title.to_string(),
            repo: Some(repo.to_string()),
        };

        SiteConfig {
            site: SiteSection::default(),
            languages: vec![
                lang("js", "JavaScript", "tschaub/geoscript-js"),
                lang("py", "Python", "jdeolive/geoscript-py"),
                lang("scala", "Scala", "dwins/geoscript.scala"),
                lang("groovy", "Groovy", "jericks/geoscript-groovy"),
            ],
            github: GithubConfig::default(),
            cookie: CookieConfig::default(),
            templates: TemplatesConfig::default(),
        }
    }
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "GeoScript".to_string(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api: ApiFlavor::V3,
            base_uri: None,
            download_base: "https://github.com".to_string(),
            branch: "master".to_string(),
            commit_limit: 10,
        }
    }
}

impl GithubConfig {
    pub fn api_base(&self) -> &str {
        self.base_uri
            .as_deref()
            .unwrap_or_else(|| self.api.default_base_uri())
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "code".to_string(),
            expires_days: 180,
            path: "/".to_string(),
        }
    }
}
