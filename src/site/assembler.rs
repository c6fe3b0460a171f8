//! View-Model Assembler
//!
//! Turns the generic content API into the page view models:
//!
//! - home page → topics → per-topic thumbnail, plus the company logo
//! - topic → articles (upstream sorted by date) → per-article thumbnail
//! - article → hero image, and author → avatar
//!
//! Fan-out requests are in flight together and joined all-or-nothing: the
//! first failure fails the page, and joined results keep upstream order no
//! matter which request finishes first. The assembler keeps no state between
//! calls besides the injected client and its configuration.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::config::AssemblerConfig;
use crate::content::client::ContentClient;
use crate::content::query::{validate_id, ContentQuery, Filter, OrderBy};
use crate::content::types::{Asset, ContentItem};
use crate::error::{ContentError, Result};
use crate::site::dates::format_published_date;
use crate::site::rendition::build_rendition_url_set;
use crate::site::sanitize::render_article_content;
use crate::site::view_models::{
    ArticleDetail, ArticleSummary, HomePageData, RenditionUrlSet, TopicArticles, TopicSummary,
};

const PUBLISHED_DATE: &str = "published_date";

#[derive(Clone)]
pub struct ViewModelAssembler {
    client: Arc<dyn ContentClient>,
    config: AssemblerConfig,
}

impl ViewModelAssembler {
    pub fn new(client: Arc<dyn ContentClient>, config: AssemblerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    // ========================================================================
    // Page Operations
    // ========================================================================

    /// Data for the topics list (home) page.
    pub async fn home_page_data(&self) -> Result<HomePageData> {
        self.fetch_home_page()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "fetching home page data failed"))
    }

    /// A single topic with its thumbnail.
    pub async fn topic(&self, topic_id: &str) -> Result<TopicSummary> {
        let topic_id = validate_id("topic", topic_id)?;
        self.fetch_topic(topic_id)
            .await
            .inspect_err(|e| tracing::warn!(topic_id, error = %e, "fetching topic failed"))
    }

    /// Articles of a topic, newest first as sorted upstream. An empty topic
    /// yields an empty list.
    pub async fn topic_articles(&self, topic_id: &str) -> Result<TopicArticles> {
        let topic_id = validate_id("topic", topic_id)?;
        self.fetch_topic_articles(topic_id)
            .await
            .inspect_err(|e| tracing::warn!(topic_id, error = %e, "fetching topic articles failed"))
    }

    /// Full article with hero image, author avatar and sanitized body.
    pub async fn article_detail(&self, article_id: &str) -> Result<ArticleDetail> {
        let article_id = validate_id("article", article_id)?;
        self.fetch_article_detail(article_id)
            .await
            .inspect_err(|e| tracing::warn!(article_id, error = %e, "fetching article details failed"))
    }

    // ========================================================================
    // Fetch Pipelines
    // ========================================================================

    async fn fetch_home_page(&self) -> Result<HomePageData> {
        let query = ContentQuery::new(
            Filter::type_is(&self.config.home_page_type).and_eq("name", &self.config.home_page_name),
        );
        let home = self
            .client
            .query_items(&query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                ContentError::not_found(format!(
                    "home page '{}' of type {}",
                    self.config.home_page_name, self.config.home_page_type
                ))
            })?;

        let company_title = home.require_str("company_name")?.to_string();
        let about_url = home.get_str("about_url").unwrap_or_default().to_string();
        let contact_url = home.get_str("contact_url").unwrap_or_default().to_string();
        let logo = home.require_reference("company_logo")?;
        let topic_refs = home.references("topics");

        tracing::debug!(topics = topic_refs.len(), "fetching home page topics");

        let topics = try_join_all(topic_refs.iter().map(|r| self.fetch_topic(&r.id)));
        let company_logo = self.rendition_set_by_id(&logo.id);
        let (topics, company_logo) = futures::try_join!(topics, company_logo)?;

        Ok(HomePageData {
            company_title,
            company_logo,
            about_url,
            contact_url,
            topics,
        })
    }

    async fn fetch_topic(&self, topic_id: &str) -> Result<TopicSummary> {
        let topic = self.client.get_item(topic_id, Some("fields.thumbnail")).await?;
        let thumbnail = self.rendition_set_for(&topic, "thumbnail").await?;
        Ok(TopicSummary {
            id: topic.id.clone(),
            name: topic.name.clone(),
            description: topic.description_or_empty(),
            thumbnail,
        })
    }

    async fn fetch_topic_articles(&self, topic_id: &str) -> Result<TopicArticles> {
        let query = ContentQuery::new(
            Filter::type_is(&self.config.article_type).and_field_eq("topic", topic_id),
        )
        .order_by(OrderBy::desc(&format!("fields.{}", PUBLISHED_DATE)))
        .all_fields();

        let items = self.client.query_items(&query).await?;
        tracing::debug!(topic_id, articles = items.len(), "fetching article thumbnails");

        let articles = try_join_all(items.iter().map(|item| self.article_summary(item))).await?;

        Ok(TopicArticles {
            topic_id: topic_id.to_string(),
            articles,
        })
    }

    async fn article_summary(&self, article: &ContentItem) -> Result<ArticleSummary> {
        let thumbnail = self.rendition_set_for(article, "image").await?;
        Ok(ArticleSummary {
            id: article.id.clone(),
            name: article.name.clone(),
            description: article.description_or_empty(),
            published_date: published_date(article),
            thumbnail,
        })
    }

    async fn fetch_article_detail(&self, article_id: &str) -> Result<ArticleDetail> {
        let article = self.client.get_item(article_id, Some("all")).await?;

        let hero_image = self.rendition_set_for(&article, "image");
        let author = async {
            let author = self.resolve_item(&article, "author", "fields.avatar").await?;
            let avatar = self.rendition_set_for(&author, "avatar").await?;
            Ok::<_, ContentError>((author.name, avatar))
        };
        let (hero_image, (author_name, author_avatar)) = futures::try_join!(hero_image, author)?;

        let content = render_article_content(article.get_str("article_content").unwrap_or_default());

        Ok(ArticleDetail {
            id: article.id.clone(),
            name: article.name.clone(),
            author_name,
            author_avatar,
            published_date: published_date(&article),
            image_caption: article.get_str("image_caption").unwrap_or_default().to_string(),
            content,
            hero_image,
        })
    }

    // ========================================================================
    // Assets
    // ========================================================================

    /// Referenced item, taken from the inline expansion when present.
    async fn resolve_item(&self, owner: &ContentItem, field: &str, expand: &str) -> Result<ContentItem> {
        if let Some(item) = owner.nested_item(field) {
            return Ok(item);
        }
        let reference = owner.require_reference(field)?;
        self.client.get_item(&reference.id, Some(expand)).await
    }

    /// Rendition set of the asset referenced by `field`.
    async fn rendition_set_for(&self, owner: &ContentItem, field: &str) -> Result<RenditionUrlSet> {
        match owner.nested_item(field) {
            Some(asset) if Asset::is_expanded(&asset) => self.rendition_set(&asset),
            _ => {
                let reference = owner.require_reference(field)?;
                self.rendition_set_by_id(&reference.id).await
            }
        }
    }

    async fn rendition_set_by_id(&self, asset_id: &str) -> Result<RenditionUrlSet> {
        let asset = self.client.get_item(asset_id, Some("fields.renditions")).await?;
        self.rendition_set(&asset)
    }

    fn rendition_set(&self, item: &ContentItem) -> Result<RenditionUrlSet> {
        let asset = Asset::from_item(item)?;
        let native = asset
            .native_url
            .clone()
            .unwrap_or_else(|| self.client.native_url(&asset.id));
        Ok(build_rendition_url_set(
            &asset.renditions,
            &native,
            asset.metadata,
            self.config.renditions.as_slice(),
        ))
    }
}

fn published_date(item: &ContentItem) -> String {
    item.date_value(PUBLISHED_DATE)
        .map(format_published_date)
        .unwrap_or_default()
}
