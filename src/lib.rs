//! Content Site
//!
//! Server-rendered topics / articles / article pages backed by a headless
//! content-management delivery API.
//!
//! - `content/`: item model, query builder, HTTP and in-memory clients
//! - `site/`: view-model assembler (fan-out fetches, rendition sets, sanitizing)
//! - `api_server`, `web/`: axum router, HTML pages and JSON page data

pub mod config;
pub mod content;
pub mod error;
pub mod site;

pub mod api_server;

#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use config::{AssemblerConfig, SiteConfig};
pub use content::{ContentClient, DeliveryClient, InMemoryClient};
pub use error::{ContentError, Result};
pub use site::ViewModelAssembler;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
