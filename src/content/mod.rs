//! Content API boundary: item model, query building and clients.

pub mod client;
pub mod memory;
pub mod query;
pub mod types;

pub use client::{ContentClient, DeliveryClient};
pub use memory::InMemoryClient;
pub use query::{validate_id, ContentQuery, Filter, OrderBy};
pub use types::{Asset, ContentItem, ItemRef, Rendition};
