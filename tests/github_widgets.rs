//! Widgets fetching from a mocked GitHub API.

use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use site_chrome::config::{GithubConfig, SiteConfig};
use site_chrome::dom::Document;
use site_chrome::github::{ApiFlavor, GitHubClient};
use site_chrome::render::{
    show_commits, show_downloads, CommitRenderer, RenderOutcome, TagRenderer, TemplateRegistry,
};
use site_chrome::render::SkipReason;
use site_chrome::site::index::{commits_container_id, skeleton};
use site_chrome::site::{CookieStore, LanguageRegistry, PageController, TabController};

fn github(server: &Server, api: ApiFlavor) -> GithubConfig {
    GithubConfig {
        api,
        base_uri: Some(server.url()),
        ..GithubConfig::default()
    }
}

fn page_with_marker() -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    doc.append_element(root, "h2", None, &["downloads-link"]).unwrap();
    doc
}

const V3_COMMITS: &str = r#"[
  {
    "sha": "1",
    "html_url": "https://github.com/o/r/commit/1",
    "author": { "login": "tschaub" },
    "commit": {
      "message": "Add a feature that is described in far more than ten words for sure",
      "author": { "name": "Tim Schaub", "date": "2011-01-02T03:04:05Z" }
    }
  },
  { "sha": "2", "commit": { "message": "broken entry without author" } },
  {
    "sha": "3",
    "html_url": "https://github.com/o/r/commit/3",
    "author": null,
    "commit": {
      "message": "Short fix",
      "author": { "name": "Someone", "date": "2011-01-01T00:00:00Z" }
    }
  }
]"#;

#[tokio::test]
async fn renders_sorted_download_list() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/repos/o/r/tags".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"name":"v0.9"},{"name":"v1.0"},{"name":"v0.10"},{"name":"nightly"}]"#)
        .create_async()
        .await;

    let client = GitHubClient::new(None, &github(&server, ApiFlavor::V3)).unwrap();
    let renderer = TagRenderer::new("https://github.com");
    let mut doc = page_with_marker();

    let outcome = show_downloads(&client, &renderer, &mut doc, "o/r").await.unwrap();
    mock.assert_async().await;

    let RenderOutcome::Rendered { node, entries } = outcome else {
        panic!("expected rendered outcome, got {:?}", outcome);
    };
    assert_eq!(entries, 4);
    let order: Vec<String> = doc
        .children(node)
        .iter()
        .map(|&li| doc.text_content(li))
        .map(|text| text.split_whitespace().next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(order, vec!["v1.0", "v0.10", "v0.9", "nightly"]);
}

#[tokio::test]
async fn missing_marker_never_fetches_tags() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = GitHubClient::new(None, &github(&server, ApiFlavor::V3)).unwrap();
    let renderer = TagRenderer::new("https://github.com");
    let mut doc = Document::new();

    let outcome = show_downloads(&client, &renderer, &mut doc, "o/r").await.unwrap();
    assert_eq!(
        outcome,
        RenderOutcome::Skipped(SkipReason::MissingTarget(".downloads-link".to_string()))
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_container_never_fetches_commits() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = GitHubClient::new(None, &github(&server, ApiFlavor::V3)).unwrap();
    let templates = TemplateRegistry::new(None).unwrap();
    let renderer = CommitRenderer::new(&templates);
    let mut doc = page_with_marker();
    let before = doc.to_html().unwrap();

    let outcome = show_commits(&client, &renderer, &mut doc, "o/r", "pycommits")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        RenderOutcome::Skipped(SkipReason::MissingTarget("#pycommits".to_string()))
    );
    assert_eq!(doc.to_html().unwrap(), before);
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_fetch_leaves_page_untouched() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/repos/o/r/tags".to_string()))
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Not Found","documentation_url":"https://docs.github.com"}"#)
        .create_async()
        .await;

    let client = GitHubClient::new(None, &github(&server, ApiFlavor::V3)).unwrap();
    let renderer = TagRenderer::new("https://github.com");
    let mut doc = page_with_marker();
    let before = doc.to_html().unwrap();

    assert!(show_downloads(&client, &renderer, &mut doc, "o/r").await.is_err());
    assert_eq!(doc.to_html().unwrap(), before);
}

#[tokio::test]
async fn v3_commits_are_paged_validated_and_truncated() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Regex(r"^/repos/o/r/commits".to_string()))
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("sha".into(), "master".into()),
            Matcher::UrlEncoded("per_page".into(), "5".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(V3_COMMITS)
        .create_async()
        .await;

    let config = GithubConfig {
        commit_limit: 5,
        ..github(&server, ApiFlavor::V3)
    };
    let client = GitHubClient::new(None, &config).unwrap();
    let templates = TemplateRegistry::new(None).unwrap();
    let renderer = CommitRenderer::new(&templates);

    let mut doc = Document::new();
    let root = doc.root();
    doc.append_element(root, "div", Some("jscommits"), &[]).unwrap();

    let outcome = show_commits(&client, &renderer, &mut doc, "o/r", "jscommits")
        .await
        .unwrap();
    mock.assert_async().await;

    assert!(matches!(outcome, RenderOutcome::Rendered { entries: 2, .. }));
    let html = doc.to_html().unwrap();
    assert!(html.contains("Add a feature that is described in far more than ..."));
    assert!(html.contains("Short fix"));
    assert!(!html.contains("broken entry"));
}

#[tokio::test]
async fn legacy_commit_list_is_supported() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            Matcher::Regex(r"^/api/v2/json/commits/list/o/r/master".to_string()),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"commits":[{
                "url":"/o/r/commit/abc",
                "message":"Adding docs",
                "author":{"login":"tschaub","name":"Tim Schaub"},
                "authored_date":"2010-03-05T12:34:56-08:00"
            }]}"#,
        )
        .create_async()
        .await;

    let client = GitHubClient::new(None, &github(&server, ApiFlavor::Legacy)).unwrap();
    let commits = client.list_commits("o/r").await.unwrap();
    mock.assert_async().await;

    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].url, "/o/r/commit/abc");
    assert_eq!(commits[0].author.name, "Tim Schaub");
}

#[tokio::test]
async fn empty_commit_list_renders_nothing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/repos/o/r/commits".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let client = GitHubClient::new(None, &github(&server, ApiFlavor::V3)).unwrap();
    let templates = TemplateRegistry::new(None).unwrap();
    let renderer = CommitRenderer::new(&templates);
    let mut doc = Document::new();
    let root = doc.root();
    doc.append_element(root, "div", Some("pycommits"), &[]).unwrap();

    let outcome = show_commits(&client, &renderer, &mut doc, "o/r", "pycommits")
        .await
        .unwrap();
    assert!(matches!(outcome, RenderOutcome::Rendered { entries: 0, .. }));
    assert_eq!(doc.to_html().unwrap().matches("<li").count(), 0);
}

#[tokio::test]
async fn index_page_end_to_end() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Regex(r"^/repos/[^/]+/[^/]+/commits".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(V3_COMMITS)
        .create_async()
        .await;
    let tags = server
        .mock("GET", Matcher::Regex(r"^/repos/jdeolive/geoscript-py/tags".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"name":"0.1"},{"name":"0.2"}]"#)
        .create_async()
        .await;

    let mut config = SiteConfig::default();
    config.github = github(&server, ApiFlavor::V3);
    let registry = LanguageRegistry::from_config(&config.languages).unwrap();
    let client = GitHubClient::new(None, &config.github).unwrap();
    let templates = TemplateRegistry::new(None).unwrap();
    let commit_renderer = CommitRenderer::new(&templates);
    let tag_renderer = TagRenderer::new(config.github.download_base.clone());

    let mut store = CookieStore::from_header(config.cookie.clone(), "code=py");
    let mut page = skeleton("GeoScript", &registry).unwrap();
    let mut tabs = TabController::new(&registry);
    let selected = tabs.build(&mut page.doc, &store).unwrap().unwrap().selected;
    assert_eq!(selected, 1);

    let language = PageController::new(&registry).prepare(&mut page.doc, &mut store);
    assert_eq!(language, "py");

    for lang in registry.iter() {
        let repo = config.repo_for(&lang.id).unwrap();
        let outcome = show_commits(
            &client,
            &commit_renderer,
            &mut page.doc,
            repo,
            &commits_container_id(&lang.id),
        )
        .await
        .unwrap();
        assert!(matches!(outcome, RenderOutcome::Rendered { entries: 2, .. }));
    }
    let repo = config.repo_for(&language).unwrap();
    show_downloads(&client, &tag_renderer, &mut page.doc, repo)
        .await
        .unwrap();
    tags.assert_async().await;

    let html = page.doc.to_html().unwrap();
    assert!(html.contains("<div id=\"tab-group\" class=\"ui-tabs\">"));
    assert!(html.contains("https://github.com/jdeolive/geoscript-py/zipball/0.2"));
    assert_eq!(html.matches("<li class=\"commit\">").count(), 8);
    assert_eq!(
        store.set_cookie_header().map(|h| h.starts_with("code=py; Expires=")),
        Some(true)
    );
}
