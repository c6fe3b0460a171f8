//! HTML side of the site: page handlers and their templates.

pub mod handlers;
