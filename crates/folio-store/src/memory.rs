//! In-memory content store.
//!
//! Applies the same filters as [`MongoStore`](crate::MongoStore) over
//! plain vectors. Backs `folio serve --in-memory`, which previews a site
//! archive without a database, and the tests.

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::model::{Link, Page, PageKind};
use crate::store::{ContentStore, StoreError};

/// Content store holding records in memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<Vec<Page>>,
    links: RwLock<Vec<Link>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page, assigning an id if it has none.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, mut page: Page) -> Self {
        page.id.get_or_insert_with(ObjectId::new);
        self.pages.write().unwrap().push(page);
        self
    }

    /// Snapshot of all stored links.
    pub fn links(&self) -> Vec<Link> {
        self.links
            .read()
            .map(|links| links.clone())
            .unwrap_or_default()
    }
}

fn poisoned(collection: &'static str) -> StoreError {
    StoreError::QueryError {
        collection,
        message: "lock poisoned".to_string(),
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn find_page(&self, kind: PageKind, tag: &str) -> Result<Option<Page>, StoreError> {
        let pages = self.pages.read().map_err(|_| poisoned("pages"))?;

        Ok(pages
            .iter()
            .find(|page| page.kind == kind && page.tag == tag)
            .cloned())
    }

    async fn find_index_link(&self) -> Result<Option<Link>, StoreError> {
        let links = self.links.read().map_err(|_| poisoned("links"))?;

        Ok(links
            .iter()
            .find(|link| link.kind == PageKind::Index)
            .cloned())
    }

    async fn find_links(&self, kind: PageKind) -> Result<Vec<Link>, StoreError> {
        let links = self.links.read().map_err(|_| poisoned("links"))?;

        Ok(links
            .iter()
            .filter(|link| link.kind == kind)
            .cloned()
            .collect())
    }

    async fn insert_page(&self, page: &Page) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        let mut stored = page.clone();
        stored.id = Some(id);

        self.pages
            .write()
            .map_err(|_| poisoned("pages"))?
            .push(stored);

        Ok(id)
    }

    async fn insert_link(&self, link: &Link) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        let mut stored = link.clone();
        stored.id = Some(id);

        self.links
            .write()
            .map_err(|_| poisoned("links"))?
            .push(stored);

        Ok(id)
    }

    async fn page_count(&self) -> Result<u64, StoreError> {
        let pages = self.pages.read().map_err(|_| poisoned("pages"))?;
        Ok(pages.len() as u64)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.pages.write().map_err(|_| poisoned("pages"))?.clear();
        self.links.write().map_err(|_| poisoned("links"))?.clear();
        Ok(())
    }
}
