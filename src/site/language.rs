use crate::config::LanguageConfig;
use crate::error::{ChromeError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub title: String,
}

impl From<&LanguageConfig> for Language {
    fn from(config: &LanguageConfig) -> Self {
        Self {
            id: config.id.clone(),
            title: config.title.clone(),
        }
    }
}

/// The fixed, ordered set of languages a site documents. The first entry is
/// the default.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
}

impl LanguageRegistry {
    pub fn new(languages: Vec<Language>) -> Result<Self> {
        if languages.is_empty() {
            return Err(ChromeError::Config("language registry is empty".to_string()));
        }
        Ok(Self { languages })
    }

    pub fn from_config(languages: &[LanguageConfig]) -> Result<Self> {
        Self::new(languages.iter().map(Language::from).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.languages.iter()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Language> {
        self.languages.iter().find(|l| l.id == id)
    }

    pub fn default_language(&self) -> &Language {
        &self.languages[0]
    }

    /// The language for `id`, or the default when `id` is unset or unknown.
    pub fn resolve(&self, id: Option<&str>) -> &Language {
        id.and_then(|id| self.get(id))
            .unwrap_or_else(|| self.default_language())
    }
}

/// Language id encoded as the suffix of an element id, e.g. `py` in `tab-py`
/// or `chooser-py`.
pub fn language_suffix(element_id: &str) -> &str {
    element_id.rsplit('-').next().unwrap_or(element_id)
}
