// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::api_server::{status_for, AppState};
use crate::error::ContentError;
use crate::site::{ArticleDetail, ArticleSummary, HomePageData, TopicSummary};

// ============================================================================
// Links and Breadcrumbs
// ============================================================================

/// `/articles/<topic_id>?topicName=<name>`
pub fn articles_href(topic_id: &str, topic_name: &str) -> String {
    format!("/articles/{}?topicName={}", topic_id, urlencoding::encode(topic_name))
}

/// `/article/<article_id>?topicName=<name>&topicId=<topic_id>`
pub fn article_href(article_id: &str, topic_id: &str, topic_name: &str) -> String {
    format!(
        "/article/{}?topicName={}&topicId={}",
        article_id,
        urlencoding::encode(topic_name),
        urlencoding::encode(topic_id)
    )
}

/// One breadcrumb; an empty `href` renders as plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct Breadcrumb {
    pub text: String,
    pub href: String,
}

impl Breadcrumb {
    fn link(text: &str, href: String) -> Self {
        Self { text: text.to_string(), href }
    }

    fn current(text: &str) -> Self {
        Self { text: text.to_string(), href: String::new() }
    }
}

fn home_crumb() -> Breadcrumb {
    Breadcrumb::link("Home", "/".to_string())
}

// ============================================================================
// Topics List (home)
// ============================================================================

pub struct TopicCard {
    pub topic: TopicSummary,
    pub href: String,
}

#[derive(Template)]
#[template(path = "pages/topics.html")]
pub struct TopicsTemplate {
    pub title: String,
    pub home: HomePageData,
    pub cards: Vec<TopicCard>,
}

pub async fn topics_page(State(state): State<AppState>) -> Response {
    let home = match state.assembler.home_page_data().await {
        Ok(home) => home,
        Err(e) => return error_page(e),
    };

    let cards = home
        .topics
        .iter()
        .map(|t| TopicCard {
            topic: t.clone(),
            href: articles_href(&t.id, &t.name),
        })
        .collect();

    render(
        StatusCode::OK,
        TopicsTemplate {
            title: "Topics".to_string(),
            home,
            cards,
        },
    )
}

// ============================================================================
// Articles List
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ArticlesQuery {
    #[serde(rename = "topicName")]
    pub topic_name: Option<String>,
}

pub struct ArticleCard {
    pub article: ArticleSummary,
    pub href: String,
}

#[derive(Template)]
#[template(path = "pages/articles.html")]
pub struct ArticlesTemplate {
    pub title: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub cards: Vec<ArticleCard>,
}

pub async fn articles_page(
    State(state): State<AppState>,
    Path(topic_id): Path<String>,
    Query(params): Query<ArticlesQuery>,
) -> Response {
    let assembler = &state.assembler;

    // Links from the home page carry the topic name; direct hits look it up.
    let fetched = match params.topic_name.filter(|n| !n.is_empty()) {
        Some(name) => assembler.topic_articles(&topic_id).await.map(|a| (name, a)),
        None => futures::try_join!(assembler.topic(&topic_id), assembler.topic_articles(&topic_id))
            .map(|(topic, articles)| (topic.name, articles)),
    };
    let (topic_name, topic_articles) = match fetched {
        Ok(v) => v,
        Err(e) => return error_page(e),
    };

    let cards = topic_articles
        .articles
        .into_iter()
        .map(|a| {
            let href = article_href(&a.id, &topic_articles.topic_id, &topic_name);
            ArticleCard { article: a, href }
        })
        .collect();

    render(
        StatusCode::OK,
        ArticlesTemplate {
            title: "Articles".to_string(),
            breadcrumbs: vec![home_crumb(), Breadcrumb::current(&topic_name)],
            cards,
        },
    )
}

// ============================================================================
// Article Detail
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ArticleQuery {
    #[serde(rename = "topicName")]
    pub topic_name: Option<String>,
    #[serde(rename = "topicId")]
    pub topic_id: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/article.html")]
pub struct ArticleTemplate {
    pub title: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub article: ArticleDetail,
}

pub async fn article_page(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    Query(params): Query<ArticleQuery>,
) -> Response {
    let article = match state.assembler.article_detail(&article_id).await {
        Ok(article) => article,
        Err(e) => return error_page(e),
    };

    // Home > topic > article, the topic crumb only when we know where we came from
    let mut breadcrumbs = vec![home_crumb()];
    if let (Some(topic_id), Some(topic_name)) = (&params.topic_id, &params.topic_name) {
        breadcrumbs.push(Breadcrumb::link(topic_name, articles_href(topic_id, topic_name)));
    }
    breadcrumbs.push(Breadcrumb::current(&article.name));

    render(
        StatusCode::OK,
        ArticleTemplate {
            title: "Article".to_string(),
            breadcrumbs,
            article,
        },
    )
}

// ============================================================================
// Not Found / Error
// ============================================================================

#[derive(Template)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub title: String,
}

#[derive(Template)]
#[template(path = "pages/error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub status: u16,
    pub message: String,
}

pub async fn not_found_page() -> Response {
    render(StatusCode::NOT_FOUND, NotFoundTemplate { title: "Not Found".to_string() })
}

fn error_page(err: ContentError) -> Response {
    let status = status_for(&err);
    if status == StatusCode::NOT_FOUND {
        return render(status, NotFoundTemplate { title: "Not Found".to_string() });
    }

    let message = match err {
        ContentError::Validation(_) => "The requested address is not valid.",
        _ => "The content could not be loaded. Please try again later.",
    };
    render(
        status,
        ErrorTemplate {
            title: "Error".to_string(),
            status: status.as_u16(),
            message: message.to_string(),
        },
    )
}

fn render<T: Template>(status: StatusCode, template: T) -> Response {
    let body = template.render().unwrap_or_else(|e| {
        tracing::error!("template error: {}", e);
        format!("Template error: {}", e)
    });
    (status, Html(body)).into_response()
}
