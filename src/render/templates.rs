use crate::error::Result;
use chrono::DateTime;
use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Name under which the commit list template is registered.
pub const GITCOMMITS: &str = "gitcommits";

/// Named templates, looked up by the widgets that render through them.
pub struct TemplateRegistry {
    engine: Handlebars<'static>,
}

/// `{{short_date date}}`: RFC 3339 timestamps become `YYYY-MM-DD`, anything
/// else is written unchanged.
fn short_date(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => out.write(&date.format("%Y-%m-%d").to_string())?,
        Err(_) => out.write(raw)?,
    }
    Ok(())
}

impl TemplateRegistry {
    /// Registers the built-in templates, replacing `gitcommits` with the file
    /// at `gitcommits_path` when given.
    pub fn new(gitcommits_path: Option<&Path>) -> Result<Self> {
        let mut engine = Handlebars::new();
        engine.register_helper("short_date", Box::new(short_date));

        match gitcommits_path {
            Some(path) => {
                debug!(path = %path.display(), "using custom commit template");
                let content = std::fs::read_to_string(path)?;
                engine.register_template_string(GITCOMMITS, content)?;
            }
            None => {
                let default_template = include_str!("../../templates/gitcommits.html.hbs");
                engine.register_template_string(GITCOMMITS, default_template)?;
            }
        }

        Ok(Self { engine })
    }

    pub fn register(&mut self, name: &str, source: &str) -> Result<()> {
        self.engine.register_template_string(name, source)?;
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.engine.has_template(name)
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Result<String> {
        Ok(self.engine.render(name, context)?)
    }
}
