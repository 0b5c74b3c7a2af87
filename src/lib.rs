//! Documentation-site chrome for multi-language projects: language tabs,
//! per-language code blocks with a persisted choice, and GitHub commit and
//! download widgets.

pub mod config;
pub mod dom;
pub mod error;
pub mod github;
pub mod render;
pub mod site;
pub mod version;

pub use error::{ChromeError, Result};
