//! Initial population of the content store.

use crate::model::{convert_to_tag, Link, Page};
use crate::store::{ContentStore, StoreError};

/// How to treat records that are already stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedMode {
    /// Leave the store untouched if it already holds pages
    #[default]
    IfEmpty,

    /// Remove all pages and links before inserting
    Replace,
}

/// Outcome of a seed run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Pages inserted
    pub pages: usize,

    /// Links inserted
    pub links: usize,

    /// True if the store already held data and nothing was inserted
    pub skipped: bool,
}

/// Insert every page together with its navigation link.
///
/// Each page gets its tag from its title before being stored.
pub async fn seed(
    store: &dyn ContentStore,
    pages: Vec<Page>,
    mode: SeedMode,
) -> Result<SeedReport, StoreError> {
    match mode {
        SeedMode::IfEmpty => {
            let existing = store.page_count().await?;
            if existing > 0 {
                tracing::info!(
                    "{} already holds {} pages, skipping seed",
                    store.backend(),
                    existing
                );
                return Ok(SeedReport {
                    skipped: true,
                    ..Default::default()
                });
            }
        }
        SeedMode::Replace => {
            tracing::info!("Clearing {} before seeding", store.backend());
            store.clear().await?;
        }
    }

    let mut report = SeedReport::default();

    for mut page in pages {
        page.tag = convert_to_tag(&page.title);
        let link = Link::for_page(&page);

        let page_id = store.insert_page(&page).await?;
        report.pages += 1;
        tracing::debug!("Added page {} ({})", page.title, page_id);

        let link_id = store.insert_link(&link).await?;
        report.links += 1;
        tracing::debug!("Added link {} ({})", link.url, link_id);
    }

    tracing::info!(
        "Seeded {} pages and {} links into {}",
        report.pages,
        report.links,
        store.backend()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::model::PageKind;
    use pretty_assertions::assert_eq;

    fn sample_pages() -> Vec<Page> {
        let mut article = Page::new(PageKind::Article, "Harz Wanderung");
        article.images = vec!["harz1.jpg".to_string(), "harz2.jpg".to_string()];

        vec![
            Page::new(PageKind::Index, "Portfolio"),
            Page::new(PageKind::Main, "Über Mich"),
            Page::new(PageKind::Footer, "Impressum"),
            article,
        ]
    }

    #[tokio::test]
    async fn seeds_pages_and_links() {
        let store = MemoryStore::new();

        let report = seed(&store, sample_pages(), SeedMode::IfEmpty)
            .await
            .unwrap();

        assert_eq!(
            report,
            SeedReport {
                pages: 4,
                links: 4,
                skipped: false
            }
        );

        let about = store
            .find_page(PageKind::Main, "ubermich")
            .await
            .unwrap()
            .expect("page stored under converted tag");
        assert_eq!(about.title, "Über Mich");

        let index = store.find_index_link().await.unwrap().unwrap();
        assert_eq!(index.url, "/");
        assert_eq!(index.tag, "portfolio");

        let articles = store.find_links(PageKind::Article).await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url, "/article/harzwanderung");
        assert_eq!(articles[0].cover_image, "harz1.jpg");
    }

    #[tokio::test]
    async fn skips_when_already_seeded() {
        let store = MemoryStore::new();
        seed(&store, sample_pages(), SeedMode::IfEmpty)
            .await
            .unwrap();

        let report = seed(&store, sample_pages(), SeedMode::IfEmpty)
            .await
            .unwrap();

        assert!(report.skipped);
        assert_eq!(store.page_count().await.unwrap(), 4);
        assert_eq!(store.links().len(), 4);
    }

    #[tokio::test]
    async fn replace_reseeds_from_scratch() {
        let store = MemoryStore::new();
        seed(&store, sample_pages(), SeedMode::IfEmpty)
            .await
            .unwrap();

        let report = seed(
            &store,
            vec![Page::new(PageKind::Index, "Portfolio")],
            SeedMode::Replace,
        )
        .await
        .unwrap();

        assert_eq!(report.pages, 1);
        assert_eq!(store.page_count().await.unwrap(), 1);
        assert_eq!(store.links().len(), 1);
    }
}
