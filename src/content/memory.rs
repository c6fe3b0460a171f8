//! In-memory `ContentClient` for tests and offline demos.
//!
//! Items are registered up front. Queries evaluate the structured filter
//! (`type`, `name`, `id` and `fields.<path>` equality), honour `orderBy` and
//! `limit`, and `get_item` expands reference fields to the registered items.
//! Individual ids can be made to fail or to respond slowly.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::content::client::ContentClient;
use crate::content::query::ContentQuery;
use crate::content::types::ContentItem;
use crate::error::{ContentError, Result};

#[derive(Debug, Clone, Default)]
pub struct InMemoryClient {
    items: Vec<ContentItem>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    fail_queries: bool,
}

impl InMemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, item: ContentItem) -> Self {
        self.items.retain(|i| i.id != item.id);
        self.items.push(item);
        self
    }

    pub fn with_items(self, items: impl IntoIterator<Item = ContentItem>) -> Self {
        items.into_iter().fold(self, |client, item| client.with_item(item))
    }

    /// `get_item(id)` fails with an upstream error.
    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    /// Every `query_items` call fails with an upstream error.
    pub fn failing_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    /// `get_item(id)` sleeps before answering.
    pub fn delayed(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    fn find(&self, id: &str) -> Option<&ContentItem> {
        self.items.iter().find(|i| i.id == id)
    }

    fn expand(&self, mut item: ContentItem, expand: &str) -> ContentItem {
        let keys: Vec<String> = if expand == "all" {
            item.fields.keys().cloned().collect()
        } else {
            expand
                .split(',')
                .filter_map(|p| p.trim().strip_prefix("fields."))
                .map(str::to_string)
                .collect()
        };

        for key in keys {
            if let Some(value) = item.fields.get(&key).cloned() {
                item.fields.insert(key, self.inline(value));
            }
        }
        item
    }

    fn inline(&self, value: Value) -> Value {
        match value {
            Value::Array(values) => Value::Array(values.into_iter().map(|v| self.inline(v)).collect()),
            Value::Object(map) => {
                let referenced = map
                    .get("id")
                    .and_then(|id| id.as_str())
                    .and_then(|id| self.find(id))
                    .and_then(|item| serde_json::to_value(item).ok());
                referenced.unwrap_or(Value::Object(map))
            }
            other => other,
        }
    }
}

#[async_trait]
impl ContentClient for InMemoryClient {
    async fn query_items(&self, query: &ContentQuery) -> Result<Vec<ContentItem>> {
        if self.fail_queries {
            return Err(ContentError::upstream(format!("query failed: {}", query.filter)));
        }

        let mut matched: Vec<ContentItem> = self
            .items
            .iter()
            .filter(|item| {
                query
                    .filter
                    .clauses()
                    .iter()
                    .all(|c| path_value(item, &c.path).as_deref() == Some(c.value.as_str()))
            })
            .cloned()
            .collect();

        if let Some(ref order) = query.order_by {
            matched.sort_by(|a, b| {
                let ka = path_value(a, &order.field);
                let kb = path_value(b, &order.field);
                if order.descending { kb.cmp(&ka) } else { ka.cmp(&kb) }
            });
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }
        Ok(matched)
    }

    async fn get_item(&self, id: &str, expand: Option<&str>) -> Result<ContentItem> {
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(id) {
            return Err(ContentError::upstream(format!("item {} failed", id)));
        }

        let item = self
            .find(id)
            .cloned()
            .ok_or_else(|| ContentError::not_found(format!("item {}", id)))?;

        Ok(match expand {
            Some(e) => self.expand(item, e),
            None => item,
        })
    }

    fn native_url(&self, id: &str) -> String {
        format!("memory://assets/{}/native", id)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Comparable string value of a filter/order path on an item. References
/// compare by id and date objects by their `value`.
fn path_value(item: &ContentItem, path: &str) -> Option<String> {
    match path {
        "id" => Some(item.id.clone()),
        "type" => Some(item.item_type.clone()),
        "name" => Some(item.name.clone()),
        _ => {
            let field = path.strip_prefix("fields.")?;
            match item.field(field)? {
                Value::String(s) => Some(s.clone()),
                Value::Object(map) => map
                    .get("id")
                    .or_else(|| map.get("value"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                other => Some(other.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::query::{Filter, OrderBy};
    use serde_json::json;

    fn item(value: Value) -> ContentItem {
        serde_json::from_value(value).unwrap()
    }

    fn client() -> InMemoryClient {
        InMemoryClient::new().with_items([
            item(json!({"id": "A1", "type": "Article", "name": "Old",
                "fields": {"topic": {"id": "T1"}, "published_date": {"value": "2020-01-01T00:00:00Z"}}})),
            item(json!({"id": "A2", "type": "Article", "name": "New",
                "fields": {"topic": {"id": "T1"}, "published_date": {"value": "2021-06-01T00:00:00Z"}}})),
            item(json!({"id": "A3", "type": "Article", "name": "Other",
                "fields": {"topic": {"id": "T2"}}})),
            item(json!({"id": "IMG", "type": "DigitalAsset", "name": "img.jpg",
                "fields": {"native": {"links": [{"href": "memory://img"}]}}})),
            item(json!({"id": "T1", "type": "Topic", "name": "Coffee",
                "fields": {"thumbnail": {"id": "IMG"}}})),
        ])
    }

    #[tokio::test]
    async fn test_query_filters_and_orders() {
        let query = ContentQuery::new(Filter::type_is("Article").and_field_eq("topic", "T1"))
            .order_by(OrderBy::desc("fields.published_date"));
        let items = client().query_items(&query).await.unwrap();
        let ids: Vec<_> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A2", "A1"]);
    }

    #[tokio::test]
    async fn test_get_item_expands_requested_field() {
        let topic = client().get_item("T1", Some("fields.thumbnail")).await.unwrap();
        let thumb = topic.nested_item("thumbnail").unwrap();
        assert_eq!(thumb.name, "img.jpg");

        let bare = client().get_item("T1", None).await.unwrap();
        assert!(bare.nested_item("thumbnail").is_none());
    }

    #[tokio::test]
    async fn test_missing_and_failing_items() {
        let c = client().failing("A1");
        assert!(c.get_item("nope", None).await.unwrap_err().is_not_found());
        assert!(matches!(c.get_item("A1", None).await, Err(ContentError::Upstream(_))));
    }
}
