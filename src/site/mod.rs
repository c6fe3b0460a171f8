//! Page data for the content site.
//!
//! ## Pages
//! 1. Topics list - company header plus one card per topic
//! 2. Articles list - articles of one topic, newest first
//! 3. Article detail - hero image, author, sanitized body

pub mod assembler;
pub mod dates;
pub mod rendition;
pub mod sanitize;
pub mod view_models;

pub use assembler::ViewModelAssembler;
pub use rendition::build_rendition_url_set;
pub use view_models::*;
