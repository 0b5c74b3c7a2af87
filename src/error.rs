use thiserror::Error;

/// Errors produced while fetching or rendering site widgets.
///
/// None of these is fatal to a page: callers log them and leave the
/// affected widget out.
#[derive(Debug, Error)]
pub enum ChromeError {
    #[error("GitHub request failed: {0}")]
    Fetch(#[from] octocrab::Error),

    #[error("unexpected response shape from {route}: {reason}")]
    Shape { route: String, reason: String },

    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("template render error: {0}")]
    TemplateRender(#[from] handlebars::RenderError),

    #[error("tab controller: {0}")]
    Tab(String),

    #[error("invalid document operation: {0}")]
    Dom(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChromeError>;
