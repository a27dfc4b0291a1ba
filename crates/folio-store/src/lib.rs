//! Content records for folio sites.
//!
//! Pages and their navigation links live in two collections. This crate
//! defines the record types, the [`ContentStore`] abstraction with a
//! MongoDB and an in-memory backend, and the seeding routine that fills a
//! fresh store.

pub mod memory;
pub mod model;
pub mod mongo;
pub mod seed;
pub mod store;

pub use memory::MemoryStore;
pub use model::{convert_to_tag, Link, Page, PageKind};
pub use mongo::{MongoConfig, MongoStore};
pub use seed::{seed, SeedMode, SeedReport};
pub use store::{ContentStore, StoreError};
