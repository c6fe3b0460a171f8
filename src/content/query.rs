//! Structured query building for the content API.
//!
//! The delivery API takes a filter expression in its own query language:
//!
//! ```text
//! (type eq "OCEGettingStartedArticle" AND fields.topic eq "CORE123")
//! ```
//!
//! Filters are assembled from clauses and rendered here instead of being
//! interpolated by callers. Literal values are double-quoted with `\` and `"`
//! backslash-escaped, so a value can never close its own literal.

use std::fmt;

use crate::error::{ContentError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub path: String,
    pub value: String,
}

/// Conjunction of `path eq "value"` clauses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn type_is(type_name: &str) -> Self {
        Self::default().and_eq("type", type_name)
    }

    pub fn and_eq(mut self, path: &str, value: &str) -> Self {
        self.clauses.push(Clause {
            path: path.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Shorthand for `fields.<field> eq "<value>"`.
    pub fn and_field_eq(self, field: &str, value: &str) -> Self {
        self.and_eq(&format!("fields.{}", field), value)
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .clauses
            .iter()
            .map(|c| format!("{} eq {}", c.path, quote(&c.value)))
            .collect();
        write!(f, "({})", rendered.join(" AND "))
    }
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

impl OrderBy {
    pub fn desc(field: &str) -> Self {
        Self { field: field.to_string(), descending: true }
    }

    pub fn asc(field: &str) -> Self {
        Self { field: field.to_string(), descending: false }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = if self.descending { "desc" } else { "asc" };
        write!(f, "{}:{}", self.field, dir)
    }
}

/// Arguments of a `queryItems` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub filter: Filter,
    pub order_by: Option<OrderBy>,
    /// `ALL` returns every field of every item instead of the summary set.
    pub fields: Option<String>,
    pub limit: Option<u32>,
}

impl ContentQuery {
    pub fn new(filter: Filter) -> Self {
        Self { filter, order_by: None, fields: None, limit: None }
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn all_fields(mut self) -> Self {
        self.fields = Some("ALL".to_string());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Item ids travel in URL paths and filter literals; only plain tokens are
/// accepted.
pub fn validate_id<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ContentError::validation(format!("{} id is empty", kind)));
    }
    let safe = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    let starts_alphanumeric = id.chars().next().is_some_and(|c| c.is_ascii_alphanumeric());
    if !safe || !starts_alphanumeric {
        return Err(ContentError::validation(format!("{} id '{}' is not a valid token", kind, id)));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_page_filter_renders_exactly() {
        let filter = Filter::type_is("OCEGettingStartedHomePage").and_eq("name", "HomePage");
        assert_eq!(
            filter.to_string(),
            r#"(type eq "OCEGettingStartedHomePage" AND name eq "HomePage")"#
        );
    }

    #[test]
    fn test_field_filter_renders_exactly() {
        let filter = Filter::type_is("OCEGettingStartedArticle").and_field_eq("topic", "CORE42");
        assert_eq!(
            filter.to_string(),
            r#"(type eq "OCEGettingStartedArticle" AND fields.topic eq "CORE42")"#
        );
    }

    #[test]
    fn test_values_cannot_break_out_of_literal() {
        let filter = Filter::type_is("A").and_eq("name", r#"x" OR type eq "B"#);
        assert_eq!(filter.to_string(), r#"(type eq "A" AND name eq "x\" OR type eq \"B")"#);

        let filter = Filter::type_is("A").and_eq("name", r"trailing\");
        assert_eq!(filter.to_string(), r#"(type eq "A" AND name eq "trailing\\")"#);
    }

    #[test]
    fn test_order_by_format() {
        assert_eq!(OrderBy::desc("fields.published_date").to_string(), "fields.published_date:desc");
        assert_eq!(OrderBy::asc("name").to_string(), "name:asc");
    }

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id("topic", " CORE_1-a.b ").unwrap(), "CORE_1-a.b");
        assert!(matches!(validate_id("topic", ""), Err(ContentError::Validation(_))));
        assert!(matches!(validate_id("topic", "   "), Err(ContentError::Validation(_))));
        assert!(matches!(validate_id("topic", "a\" OR 1"), Err(ContentError::Validation(_))));
        assert!(matches!(validate_id("topic", "../etc"), Err(ContentError::Validation(_))));
        assert!(matches!(validate_id("topic", ".."), Err(ContentError::Validation(_))));
        assert!(matches!(validate_id("topic", "."), Err(ContentError::Validation(_))));
        assert!(matches!(validate_id("topic", "-x"), Err(ContentError::Validation(_))));
    }
}
