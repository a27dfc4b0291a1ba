//! Content store trait and error types.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::model::{Link, Page, PageKind};

/// Errors that can occur while talking to a content store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to connect to database: {0}")]
    ConnectError(String),

    #[error("Query on {collection} failed: {message}")]
    QueryError {
        collection: &'static str,
        message: String,
    },

    #[error("Failed to insert into {collection}: {message}")]
    InsertError {
        collection: &'static str,
        message: String,
    },
}

/// Read and write access to the `pages` and `links` collections.
///
/// Lookups filter on the `type` field and, for pages, on `tag`.
/// Links are returned in insertion order.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Short backend identifier used in logs.
    fn backend(&self) -> &'static str;

    /// Find the page with the given type and tag.
    async fn find_page(&self, kind: PageKind, tag: &str) -> Result<Option<Page>, StoreError>;

    /// Find the link of the index page.
    async fn find_index_link(&self) -> Result<Option<Link>, StoreError>;

    /// Find all links of the given type.
    async fn find_links(&self, kind: PageKind) -> Result<Vec<Link>, StoreError>;

    /// Insert a page, returning its generated id.
    async fn insert_page(&self, page: &Page) -> Result<ObjectId, StoreError>;

    /// Insert a link, returning its generated id.
    async fn insert_link(&self, link: &Link) -> Result<ObjectId, StoreError>;

    /// Number of stored pages.
    async fn page_count(&self) -> Result<u64, StoreError>;

    /// Remove all pages and links.
    async fn clear(&self) -> Result<(), StoreError>;
}
