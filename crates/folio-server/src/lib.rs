//! HTTP server for folio sites.
//!
//! Renders pages from a [`folio_store::ContentStore`] through minijinja
//! templates and serves the static and extracted archive directories.

pub mod assets;
mod handlers;
pub mod server;
pub mod templates;
pub mod watcher;

pub use assets::write_default_assets;
pub use handlers::load_template_data;
pub use server::{build_router, AppState, ServerError, SiteServer, SiteServerConfig};
pub use templates::{
    write_default_templates, TemplateData, TemplateEngine, TemplateError, TemplateKind,
};
pub use watcher::{TemplateEvent, TemplateWatcher};
