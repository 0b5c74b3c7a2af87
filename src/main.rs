use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

use site_chrome::config::SiteConfig;
use site_chrome::dom::Document;
use site_chrome::github::{ApiFlavor, GitHubClient};
use site_chrome::render::{
    show_commits, show_downloads, CommitRenderer, RenderOutcome, TagRenderer, TemplateRegistry,
};
use site_chrome::site::index::{commits_container_id, skeleton};
use site_chrome::site::{CookieStore, LanguageRegistry, LanguageStore, PageController, TabController};
use site_chrome::version::sort_tags;

#[derive(Parser)]
#[command(name = "site-chrome")]
#[command(about = "Render language tabs and GitHub widgets for a documentation site")]
struct Cli {
    /// Site configuration file (TOML); built-in defaults when omitted
    #[arg(short, long, env = "SITE_CHROME_CONFIG")]
    config: Option<PathBuf>,

    /// GitHub token (can also be set via GITHUB_TOKEN env var)
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Override the configured API flavor (v3 or legacy)
    #[arg(long)]
    api: Option<ApiFlavor>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print tag names newest first
    Sort {
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Print the download list for a repository's tags
    Tags {
        /// Repository as owner/name
        #[arg(short, long)]
        repo: String,
    },

    /// Print a repository's recent commits through the gitcommits template
    Commits {
        /// Repository as owner/name
        #[arg(short, long)]
        repo: String,

        /// Language id used to name the target container
        #[arg(short, long, default_value = "js")]
        lang: String,

        #[arg(long)]
        limit: Option<u8>,
    },

    /// Render the project index page for every configured language
    Index {
        /// Cookie header of the incoming request, e.g. "code=py"
        #[arg(long, default_value = "")]
        cookie: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SiteConfig::default(),
    };
    if let Some(api) = cli.api {
        config.github.api = api;
    }

    match cli.command {
        Commands::Sort { mut tags } => {
            sort_tags(&mut tags);
            for tag in tags {
                println!("{}", tag);
            }
        }
        Commands::Tags { repo } => {
            let client = GitHubClient::new(cli.token, &config.github)?;
            let renderer = TagRenderer::new(config.github.download_base.clone());

            let mut doc = Document::new();
            let root = doc.root();
            doc.append_element(root, "span", None, &["downloads-link"])?;

            let outcome = show_downloads(&client, &renderer, &mut doc, &repo)
                .await
                .with_context(|| format!("fetching tags for {}", repo))?;
            if let RenderOutcome::Rendered { node, .. } = outcome {
                println!("{}", doc.node_html(node)?);
            }
        }
        Commands::Commits { repo, lang, limit } => {
            if let Some(limit) = limit {
                config.github.commit_limit = limit;
                config.validate()?;
            }
            let client = GitHubClient::new(cli.token, &config.github)?;
            let templates = TemplateRegistry::new(config.templates.gitcommits.as_deref())?;
            let renderer = CommitRenderer::new(&templates);

            let container_id = commits_container_id(&lang);
            let mut doc = Document::new();
            let root = doc.root();
            let container = doc.append_element(root, "div", Some(container_id.as_str()), &[])?;

            show_commits(&client, &renderer, &mut doc, &repo, &container_id)
                .await
                .with_context(|| format!("fetching commits for {}", repo))?;
            println!("{}", doc.node_html(container)?);
        }
        Commands::Index { cookie } => {
            let registry = LanguageRegistry::from_config(&config.languages)?;
            let client = GitHubClient::new(cli.token, &config.github)?;
            let templates = TemplateRegistry::new(config.templates.gitcommits.as_deref())?;
            let commit_renderer = CommitRenderer::new(&templates);
            let tag_renderer = TagRenderer::new(config.github.download_base.clone());

            let mut store = CookieStore::from_header(config.cookie.clone(), &cookie);
            let mut page = skeleton(&config.site.title, &registry)?;

            let controller = PageController::new(&registry);
            let mut tabs = TabController::new(&registry).on_show(controller.on_tab_show());
            tabs.build(&mut page.doc, &store)?;
            let language = controller.prepare(&mut page.doc, &mut store);

            for lang in registry.iter() {
                let Some(repo) = config.repo_for(&lang.id) else {
                    continue;
                };
                let container_id = commits_container_id(&lang.id);
                if let Err(e) = show_commits(&client, &commit_renderer, &mut page.doc, repo, &container_id).await {
                    warn!(language = %lang.id, error = %e, "commits not shown");
                }
            }

            if let Some(repo) = config.repo_for(&language) {
                if let Err(e) = show_downloads(&client, &tag_renderer, &mut page.doc, repo).await {
                    warn!(%language, error = %e, "downloads not shown");
                }
            }

            println!("{}", page.doc.to_html()?);
            if let Some(set_cookie) = store.set_cookie_header() {
                eprintln!("Set-Cookie: {}", set_cookie);
            }
            tracing::debug!(stored = ?store.load(), "index rendered");
        }
    }

    Ok(())
}
