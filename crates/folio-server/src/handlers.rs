//! Page handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Html;
use axum::routing::{get, MethodRouter};

use folio_store::{ContentStore, PageKind};

use crate::server::{AppState, ServerError};
use crate::templates::{TemplateData, TemplateKind};

/// Handle GET / (the index page).
pub(crate) async fn index_page(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, ServerError> {
    render_page(&state, PageKind::Index, &state.index_tag).await
}

/// Route serving pages of `kind` by the rest of the path after its prefix.
pub(crate) fn page_route(kind: PageKind) -> MethodRouter<Arc<AppState>> {
    get(
        move |State(state): State<Arc<AppState>>, Path(tag): Path<String>| async move {
            render_page(&state, kind, &tag).await
        },
    )
}

/// Fallback for paths outside the known prefixes.
pub(crate) async fn not_found(uri: Uri) -> ServerError {
    ServerError::RouteNotFound(uri.path().to_string())
}

async fn render_page(
    state: &AppState,
    kind: PageKind,
    tag: &str,
) -> Result<Html<String>, ServerError> {
    let data = load_template_data(state.store.as_ref(), kind, tag).await?;
    let template = TemplateKind::select(kind, &data.page);

    tracing::info!(
        "Rendering {} page {:?} with {}",
        kind,
        data.page.title,
        template.file_name()
    );

    let html = state.templates.render(template, &data)?;
    Ok(Html(html))
}

/// Collect the page and navigation needed to render it.
///
/// Article links are only loaded for the index page.
pub async fn load_template_data(
    store: &dyn ContentStore,
    kind: PageKind,
    tag: &str,
) -> Result<TemplateData, ServerError> {
    let page = store
        .find_page(kind, tag)
        .await?
        .ok_or_else(|| ServerError::PageNotFound {
            kind,
            tag: tag.to_string(),
        })?;

    let index_link = store.find_index_link().await?;
    if index_link.is_none() {
        tracing::warn!("No index link stored in {}", store.backend());
    }

    let main_links = store.find_links(PageKind::Main).await?;
    let footer_links = store.find_links(PageKind::Footer).await?;

    let article_links = if kind == PageKind::Index {
        store.find_links(PageKind::Article).await?
    } else {
        Vec::new()
    };

    Ok(TemplateData {
        page,
        index_link,
        main_links,
        footer_links,
        article_links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_store::{seed, MemoryStore, Page, SeedMode};

    async fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        let pages = vec![
            Page::new(PageKind::Index, "Portfolio"),
            Page::new(PageKind::Main, "Lebenslauf"),
            Page::new(PageKind::Main, "Hobbys"),
            Page::new(PageKind::Footer, "Impressum"),
            Page::new(PageKind::Article, "Harz"),
        ];
        seed(&store, pages, SeedMode::IfEmpty).await.unwrap();
        store
    }

    #[tokio::test]
    async fn index_data_includes_articles() {
        let store = seeded_store().await;

        let data = load_template_data(&store, PageKind::Index, "portfolio")
            .await
            .unwrap();

        assert_eq!(data.page.title, "Portfolio");
        assert_eq!(data.index_link.unwrap().url, "/");
        assert_eq!(data.main_links.len(), 2);
        assert_eq!(data.footer_links.len(), 1);
        assert_eq!(data.article_links.len(), 1);
    }

    #[tokio::test]
    async fn other_pages_skip_articles() {
        let store = seeded_store().await;

        let data = load_template_data(&store, PageKind::Main, "hobbys")
            .await
            .unwrap();

        assert_eq!(data.page.title, "Hobbys");
        assert!(data.article_links.is_empty());
        assert_eq!(data.main_links.len(), 2);
    }

    #[tokio::test]
    async fn unknown_tag_is_not_found() {
        let store = seeded_store().await;

        let err = load_template_data(&store, PageKind::Footer, "lebenslauf")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServerError::PageNotFound { kind: PageKind::Footer, ref tag } if tag == "lebenslauf"
        ));
    }
}
