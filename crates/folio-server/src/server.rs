//! Site server implementation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use folio_store::{ContentStore, PageKind, StoreError};

use crate::handlers;
use crate::templates::{TemplateEngine, TemplateError};
use crate::watcher::TemplateWatcher;

/// Configuration for the site server.
#[derive(Debug, Clone)]
pub struct SiteServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Open browser on start
    pub open: bool,

    /// Reload templates when they change on disk
    pub watch: bool,

    /// Directory served under `/static`
    pub static_dir: PathBuf,

    /// Directory served under `/temporary`, filled from the site archive
    pub temporary_dir: PathBuf,

    /// Directory holding the page templates
    pub templates_dir: PathBuf,

    /// Tag of the page served at `/`
    pub index_tag: String,
}

impl Default for SiteServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9090,
            open: false,
            watch: false,
            static_dir: PathBuf::from("static"),
            temporary_dir: PathBuf::from("temporary"),
            templates_dir: PathBuf::from("templates"),
            index_tag: "portfolio".to_string(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address {0}")]
    AddressError(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error("No {kind} page with tag {tag:?}")]
    PageNotFound { kind: PageKind, tag: String },

    #[error("No route for {0}")]
    RouteNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::PageNotFound { .. } | ServerError::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        let reason = status.canonical_reason().unwrap_or("Error");
        let body = format!(
            r#"<!DOCTYPE html>
<html lang="de">
<head><meta charset="utf-8"><title>{code} {reason}</title></head>
<body><h1>{code} {reason}</h1><p><a href="/">Startseite</a></p></body>
</html>"#,
            code = status.as_u16(),
        );

        (status, Html(body)).into_response()
    }
}

/// Shared server state.
pub struct AppState {
    /// Source of pages and links
    pub store: Arc<dyn ContentStore>,

    /// Page templates
    pub templates: Arc<TemplateEngine>,

    /// Tag of the page served at `/`
    pub index_tag: String,
}

/// Build the application router.
pub fn build_router(config: &SiteServerConfig, state: Arc<AppState>) -> Router {
    let mut router = Router::new().route("/", get(handlers::index_page));

    for kind in [PageKind::Main, PageKind::Footer, PageKind::Article] {
        let path = format!("{}{{*tag}}", kind.route_prefix());
        router = router.route(&path, handlers::page_route(kind));
    }

    router
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .nest_service("/temporary", ServeDir::new(&config.temporary_dir))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Site server.
pub struct SiteServer {
    config: SiteServerConfig,
    store: Arc<dyn ContentStore>,
}

impl SiteServer {
    /// Create a new site server over `store`.
    pub fn new(config: SiteServerConfig, store: Arc<dyn ContentStore>) -> Self {
        Self { config, store }
    }

    /// Start the site server and serve until the process ends.
    pub async fn start(self) -> Result<(), ServerError> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|_| {
                ServerError::AddressError(format!("{}:{}", self.config.host, self.config.port))
            })?;

        let templates = Arc::new(TemplateEngine::from_dir(&self.config.templates_dir)?);

        if self.config.watch {
            let (watcher, mut rx) = TemplateWatcher::new(templates.dir())
                .map_err(|e| ServerError::WatchError(e.to_string()))?;

            let templates = Arc::clone(&templates);
            tokio::spawn(async move {
                while let Some(event) = rx.recv().await {
                    tracing::info!("Template changed: {}", event.path().display());
                    templates.reload();
                }
                // Keep watcher alive
                drop(watcher);
            });
        }

        let state = Arc::new(AppState {
            store: Arc::clone(&self.store),
            templates,
            index_tag: self.config.index_tag.clone(),
        });

        let app = build_router(&self.config, state);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        tracing::info!(
            "Serving {} content at http://{}",
            self.store.backend(),
            addr
        );

        if self.config.open {
            let url = format!("http://{}", browser_host(addr));
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

/// Address a local browser can reach when bound to all interfaces.
fn browser_host(addr: SocketAddr) -> SocketAddr {
    if addr.ip().is_unspecified() {
        SocketAddr::from(([127, 0, 0, 1], addr.port()))
    } else {
        addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use folio_store::{seed, MemoryStore, Page, SeedMode};
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    use crate::templates::write_default_templates;

    struct Site {
        _root: TempDir,
        router: Router,
    }

    async fn site() -> Site {
        let root = tempdir().unwrap();
        let config = SiteServerConfig {
            static_dir: root.path().join("static"),
            temporary_dir: root.path().join("temporary"),
            templates_dir: root.path().join("templates"),
            ..Default::default()
        };

        write_default_templates(&config.templates_dir, false).unwrap();
        fs::create_dir_all(config.static_dir.join("css")).unwrap();
        fs::write(config.static_dir.join("css/main.css"), "body {}").unwrap();
        fs::create_dir_all(config.temporary_dir.join("assets/js")).unwrap();
        fs::write(config.temporary_dir.join("assets/js/map.js"), "var zoom=13;").unwrap();

        let mut index = Page::new(PageKind::Index, "Portfolio");
        index.content = "<p>Willkommen</p>".to_string();
        let mut gallery = Page::new(PageKind::Article, "Harz Tour");
        gallery.images = vec!["h1.jpg".to_string(), "h2.jpg".to_string()];
        let mut film = Page::new(PageKind::Article, "Kurzfilm");
        film.video = "https://www.youtube.com/embed/abc".to_string();

        let store = MemoryStore::new();
        seed(
            &store,
            vec![
                index,
                Page::new(PageKind::Main, "Über Mich"),
                Page::new(PageKind::Footer, "Impressum"),
                Page::new(PageKind::Main, "Foto/Video"),
                gallery,
                film,
            ],
            SeedMode::IfEmpty,
        )
        .await
        .unwrap();

        let state = Arc::new(AppState {
            store: Arc::new(store),
            templates: Arc::new(TemplateEngine::from_dir(&config.templates_dir).unwrap()),
            index_tag: config.index_tag.clone(),
        });

        Site {
            router: build_router(&config, state),
            _root: root,
        }
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec())
            .unwrap()
            .replace("&#x2f;", "/");

        (status, html)
    }

    #[tokio::test]
    async fn serves_index_with_articles() {
        let site = site().await;

        let (status, html) = get(&site.router, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<p>Willkommen</p>"));
        assert!(html.contains(r#"href="/article/harztour""#));
        assert!(html.contains(r#"href="/main/ubermich""#));
        assert!(html.contains(r#"href="/footer/impressum""#));
    }

    #[tokio::test]
    async fn serves_pages_by_prefix() {
        let site = site().await;

        let (status, html) = get(&site.router, "/main/ubermich").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<title>Über Mich</title>"));
        assert!(html.contains(r#"<article class="page">"#));
        assert!(!html.contains(r#"class="articles""#));

        let (status, _) = get(&site.router, "/footer/impressum").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn follows_links_with_slashes_in_tag() {
        let site = site().await;

        let (_, html) = get(&site.router, "/").await;
        assert!(html.contains(r#"href="/main/foto/video""#));

        let (status, html) = get(&site.router, "/main/foto/video").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<title>Foto/Video</title>"));

        let (status, _) = get(&site.router, "/main/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn picks_slideshow_and_video_templates() {
        let site = site().await;

        let (_, html) = get(&site.router, "/article/harztour").await;
        assert!(html.contains(r#"class="slideshow""#));

        let (_, html) = get(&site.router, "/article/kurzfilm").await;
        assert!(html.contains(r#"<iframe src="https://www.youtube.com/embed/abc""#));
    }

    #[tokio::test]
    async fn unknown_pages_are_not_found() {
        let site = site().await;

        let (status, html) = get(&site.router, "/main/impressum").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("404 Not Found"));

        let (status, _) = get(&site.router, "/elsewhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_static_and_extracted_files() {
        let site = site().await;

        let (status, body) = get(&site.router, "/static/css/main.css").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "body {}");

        let (status, body) = get(&site.router, "/temporary/assets/js/map.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "var zoom=13;");
    }

    #[test]
    fn maps_errors_to_status_codes() {
        let missing = ServerError::PageNotFound {
            kind: PageKind::Main,
            tag: "x".to_string(),
        };
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let store = ServerError::Store(StoreError::ConnectError("down".to_string()));
        assert_eq!(
            store.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn browser_host_replaces_unspecified_ip() {
        let addr: SocketAddr = "0.0.0.0:9090".parse().unwrap();
        assert_eq!(browser_host(addr).to_string(), "127.0.0.1:9090");

        let addr: SocketAddr = "192.168.1.5:80".parse().unwrap();
        assert_eq!(browser_host(addr), addr);
    }
}
