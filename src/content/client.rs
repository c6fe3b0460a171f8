//! Content API client.
//!
//! `ContentClient` is the boundary the assembler consumes. `DeliveryClient`
//! implements it over the REST delivery API with reqwest; tests and local
//! demos use `InMemoryClient`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::content::query::{validate_id, ContentQuery};
use crate::content::types::{ContentItem, ItemsResponse};
use crate::error::{ContentError, Result};

/// The three calls the site needs from the content API.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// `queryItems`: items matching the filter, in upstream order.
    async fn query_items(&self, query: &ContentQuery) -> Result<Vec<ContentItem>>;

    /// `getItem`: a single item, with reference fields optionally expanded
    /// (`"all"` or a field path such as `"fields.thumbnail"`).
    async fn get_item(&self, id: &str, expand: Option<&str>) -> Result<ContentItem>;

    /// Direct URL of an asset's original binary.
    fn native_url(&self, id: &str) -> String;

    /// Client name for logging.
    fn name(&self) -> &'static str;
}

// ============================================================================
// HTTP Delivery Client
// ============================================================================

/// reqwest-backed client for the delivery (or preview) REST API.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    client: Client,
    config: ClientConfig,
}

impl DeliveryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &[(&str, String)]) -> Result<T> {
        let mut request = self
            .client
            .get(url)
            .query(params)
            .query(&[("channelToken", self.config.channel_token.as_str())]);

        if let Some(ref auth) = self.config.authorization {
            request = request.header(AUTHORIZATION, auth);
        }

        tracing::debug!(url = %url, "content API request");
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ContentError::not_found(format!("{} returned 404", url)));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::upstream(format!(
                "{} returned {}: {}",
                url,
                status,
                truncate(&body, 200)
            )));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ContentClient for DeliveryClient {
    async fn query_items(&self, query: &ContentQuery) -> Result<Vec<ContentItem>> {
        let url = format!("{}/items", self.config.api_base());
        let params = query_params(query);
        let response: ItemsResponse = self.get_json(&url, &params).await?;
        if response.has_more {
            tracing::debug!(filter = %query.filter, "query has more results than returned");
        }
        Ok(response.items)
    }

    async fn get_item(&self, id: &str, expand: Option<&str>) -> Result<ContentItem> {
        let id = validate_id("item", id)?;
        let url = format!("{}/items/{}", self.config.api_base(), id);
        let params: Vec<(&str, String)> = expand
            .map(|e| vec![("expand", e.to_string())])
            .unwrap_or_default();
        self.get_json(&url, &params).await
    }

    fn native_url(&self, id: &str) -> String {
        format!(
            "{}/assets/{}/native?channelToken={}",
            self.config.api_base(),
            id,
            urlencoding::encode(&self.config.channel_token)
        )
    }

    fn name(&self) -> &'static str {
        "delivery"
    }
}

/// Query-string parameters of a `queryItems` call.
pub fn query_params(query: &ContentQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("q", query.filter.to_string())];
    if let Some(ref order) = query.order_by {
        params.push(("orderBy", order.to_string()));
    }
    if let Some(ref fields) = query.fields {
        params.push(("fields", fields.clone()));
    }
    if let Some(limit) = query.limit {
        params.push(("limit", limit.to_string()));
    }
    params
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentMode;
    use crate::content::query::{Filter, OrderBy};

    fn config() -> ClientConfig {
        ClientConfig {
            server_url: "https://content.example.com".to_string(),
            api_version: "v1.1".to_string(),
            channel_token: "tok".to_string(),
            mode: ContentMode::Delivery,
            authorization: None,
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_query_params() {
        let query = ContentQuery::new(Filter::type_is("Article").and_field_eq("topic", "T1"))
            .order_by(OrderBy::desc("fields.published_date"))
            .all_fields();
        let params = query_params(&query);
        assert_eq!(params[0], ("q", r#"(type eq "Article" AND fields.topic eq "T1")"#.to_string()));
        assert_eq!(params[1], ("orderBy", "fields.published_date:desc".to_string()));
        assert_eq!(params[2], ("fields", "ALL".to_string()));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_native_url() {
        let client = DeliveryClient::new(config()).unwrap();
        assert_eq!(
            client.native_url("CONT1"),
            "https://content.example.com/content/published/api/v1.1/assets/CONT1/native?channelToken=tok"
        );

        let mut cfg = config();
        cfg.channel_token = "a&b=c d".to_string();
        let client = DeliveryClient::new(cfg).unwrap();
        assert!(client.native_url("CONT1").ends_with("/native?channelToken=a%26b%3Dc%20d"));
    }

    #[tokio::test]
    async fn test_get_item_rejects_unsafe_id_before_sending() {
        let client = DeliveryClient::new(config()).unwrap();
        let err = client.get_item("../items", None).await.unwrap_err();
        assert!(matches!(err, ContentError::Validation(_)));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
