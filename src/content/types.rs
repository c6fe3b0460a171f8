//! Content API data model.
//!
//! Items come back from the delivery API as a generic record whose `fields`
//! are an untyped map. Field names are a convention of the content types
//! (`published_date`, `article_content`, `image`, ...), so the accessors here
//! are lenient and return `Option`; the assembler decides what is required.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{ContentError, Result};

/// Generic item returned by `queryItems` / `getItem`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

/// Reference to another item as it appears inside a field.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRef {
    pub id: String,
    pub name: Option<String>,
}

impl ContentItem {
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(|v| v.as_str())
    }

    /// String field that the caller cannot do without.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.get_str(key).ok_or_else(|| {
            ContentError::upstream(format!("item {} has no '{}' field", self.id, key))
        })
    }

    pub fn description_or_empty(&self) -> String {
        self.description.clone().unwrap_or_default()
    }

    /// Single reference field: `{"id": "...", "name": "..."}`.
    pub fn reference(&self, key: &str) -> Option<ItemRef> {
        self.field(key).and_then(to_ref)
    }

    pub fn require_reference(&self, key: &str) -> Result<ItemRef> {
        self.reference(key).ok_or_else(|| {
            ContentError::upstream(format!("item {} has no '{}' reference", self.id, key))
        })
    }

    /// Multi-valued reference field, in upstream order.
    pub fn references(&self, key: &str) -> Vec<ItemRef> {
        match self.field(key) {
            Some(Value::Array(values)) => values.iter().filter_map(to_ref).collect(),
            _ => Vec::new(),
        }
    }

    /// Reference field that was expanded inline into a full item.
    pub fn nested_item(&self, key: &str) -> Option<ContentItem> {
        let value = self.field(key)?;
        if value.get("id").is_none() || value.get("fields").is_none() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Date fields arrive as `{"value": "...", "timezone": "UTC"}`; older
    /// payloads use a bare string.
    pub fn date_value(&self, key: &str) -> Option<&str> {
        match self.field(key)? {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("value").and_then(|v| v.as_str()),
            _ => None,
        }
    }
}

fn to_ref(value: &Value) -> Option<ItemRef> {
    let id = value.get("id")?.as_str()?.to_string();
    let name = value.get("name").and_then(|n| n.as_str()).map(str::to_string);
    Some(ItemRef { id, name })
}

// ============================================================================
// Query Response
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<ContentItem>,
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
}

// ============================================================================
// Digital Assets and Renditions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Link {
    #[serde(default)]
    pub rel: String,
    pub href: String,
}

/// Width/height as published. The API is inconsistent about numbers vs
/// numeric strings, so both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Dimensions {
    #[serde(default, deserialize_with = "de_dimension")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "de_dimension")]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RenditionFormat {
    pub format: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub metadata: Dimensions,
}

impl RenditionFormat {
    pub fn self_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.rel == "self")
            .map(|l| l.href.as_str())
    }
}

/// Named image variant of an asset ("Thumbnail", "Small", ...).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Rendition {
    pub name: String,
    #[serde(default)]
    pub formats: Vec<RenditionFormat>,
}

impl Rendition {
    pub fn format(&self, format: &str) -> Option<&RenditionFormat> {
        self.formats.iter().find(|f| f.format == format)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NativeLinks {
    #[serde(default)]
    links: Vec<Link>,
}

/// Typed view of a digital asset item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Asset {
    pub id: String,
    pub renditions: Vec<Rendition>,
    pub native_url: Option<String>,
    pub metadata: Dimensions,
}

impl Asset {
    pub fn from_item(item: &ContentItem) -> Result<Self> {
        let renditions: Vec<Rendition> = match item.field("renditions") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Vec::new(),
        };

        let native_url = match item.field("native") {
            Some(value) => {
                let native: NativeLinks = serde_json::from_value(value.clone())?;
                native.links.into_iter().next().map(|l| l.href)
            }
            None => None,
        };

        let metadata = match item.field("metadata") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => Dimensions::default(),
        };

        Ok(Self {
            id: item.id.clone(),
            renditions,
            native_url,
            metadata,
        })
    }

    /// True when the item already carries what a rendition set needs, i.e. it
    /// was expanded inline rather than being a bare reference.
    pub fn is_expanded(item: &ContentItem) -> bool {
        item.field("renditions").is_some() || item.field("native").is_some()
    }
}

fn de_dimension<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
