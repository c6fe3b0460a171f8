//! View Models for the site pages
//!
//! Plain data handed to the templates and to the JSON routes. Built fresh for
//! every request by the assembler and never mutated afterwards.

use std::collections::BTreeMap;

use serde::Serialize;

/// Responsive-image descriptor built from an asset's renditions.
///
/// `srcset` holds the webp entries followed by the native image, `jpg_srcset`
/// the jpg entries, and `named` the jpg URL of every rendition keyed by its
/// lowercase name (`small`, `medium`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenditionUrlSet {
    pub srcset: String,
    pub jpg_srcset: String,
    pub native: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub named: BTreeMap<String, String>,
}

impl RenditionUrlSet {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named.get(&name.to_ascii_lowercase()).map(|s| s.as_str())
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.get("thumbnail")
    }

    pub fn small(&self) -> Option<&str> {
        self.get("small")
    }

    pub fn medium(&self) -> Option<&str> {
        self.get("medium")
    }

    pub fn large(&self) -> Option<&str> {
        self.get("large")
    }

    /// jpg URL of the named rendition, or the native image when that
    /// rendition was not published.
    pub fn src_or_native(&self, name: &str) -> &str {
        self.get(name).unwrap_or(self.native.as_str())
    }

    pub fn width_display(&self) -> String {
        self.width.map(|w| w.to_string()).unwrap_or_default()
    }

    pub fn height_display(&self) -> String {
        self.height.map(|h| h.to_string()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub thumbnail: RenditionUrlSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Already formatted for display, e.g. "March 3, 2021".
    pub published_date: String,
    pub thumbnail: RenditionUrlSet,
}

/// Article body after the plain-text / HTML dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "camelCase")]
pub enum ArticleContent {
    /// Sanitized markup, safe to emit unescaped.
    Html(String),
    /// Text with no markup; must be escaped on output.
    PlainText(String),
}

impl ArticleContent {
    pub fn is_html(&self) -> bool {
        matches!(self, ArticleContent::Html(_))
    }

    pub fn body(&self) -> &str {
        match self {
            ArticleContent::Html(s) | ArticleContent::PlainText(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDetail {
    pub id: String,
    pub name: String,
    pub author_name: String,
    pub author_avatar: RenditionUrlSet,
    pub published_date: String,
    pub image_caption: String,
    pub content: ArticleContent,
    pub hero_image: RenditionUrlSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePageData {
    pub company_title: String,
    pub company_logo: RenditionUrlSet,
    pub about_url: String,
    pub contact_url: String,
    pub topics: Vec<TopicSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicArticles {
    pub topic_id: String,
    pub articles: Vec<ArticleSummary>,
}
