//! Site configuration, read once from the environment at startup.
//!
//! `SERVER_URL` and `CHANNEL_TOKEN` are required; everything else has a
//! default suitable for the sample content repository.

use anyhow::{bail, Context};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentMode {
    /// Published content on a public or secure channel.
    Delivery,
    /// Content assigned to a channel but not yet published. Needs `AUTH`.
    Preview,
}

impl ContentMode {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "delivery" => Ok(ContentMode::Delivery),
            "preview" => Ok(ContentMode::Preview),
            other => bail!("CONTENT_MODE must be 'delivery' or 'preview', got '{}'", other),
        }
    }

    /// Path segment of the content REST API for this mode.
    pub fn path_segment(&self) -> &'static str {
        match self {
            ContentMode::Delivery => "published",
            ContentMode::Preview => "preview",
        }
    }
}

/// Settings of the HTTP content client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub api_version: String,
    pub channel_token: String,
    pub mode: ContentMode,
    /// Full `Authorization` header value, e.g. `Bearer ...`.
    pub authorization: Option<String>,
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// `{server}/content/{published|preview}/api/{version}`
    pub fn api_base(&self) -> String {
        format!(
            "{}/content/{}/api/{}",
            self.server_url.trim_end_matches('/'),
            self.mode.path_segment(),
            self.api_version
        )
    }
}

/// Content type names and rendition list used by the assembler.
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    pub home_page_type: String,
    pub home_page_name: String,
    pub article_type: String,
    /// Rendition names, in the order their entries appear in a srcset.
    pub renditions: Vec<String>,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            home_page_type: "OCEGettingStartedHomePage".to_string(),
            home_page_name: "HomePage".to_string(),
            article_type: "OCEGettingStartedArticle".to_string(),
            renditions: ["Thumbnail", "Small", "Medium", "Large"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub client: ClientConfig,
    pub assembler: AssemblerConfig,
    pub port: u16,
    pub public_dir: String,
}

impl SiteConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_url = get("SERVER_URL").context("SERVER_URL is not set")?;
        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            bail!("SERVER_URL must start with http:// or https://, got '{}'", server_url);
        }

        let channel_token = get("CHANNEL_TOKEN").context("CHANNEL_TOKEN is not set")?;
        let mode = ContentMode::parse(&get("CONTENT_MODE").unwrap_or_default())?;
        let authorization = get("AUTH");
        if mode == ContentMode::Preview && authorization.is_none() {
            bail!("CONTENT_MODE=preview requires AUTH");
        }

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("REQUEST_TIMEOUT_SECS is not a number: '{}'", v))?,
            None => 30,
        };

        let port = match get("PORT") {
            Some(v) => v.parse().with_context(|| format!("PORT is not a valid port: '{}'", v))?,
            None => 8080,
        };

        let defaults = AssemblerConfig::default();
        let assembler = AssemblerConfig {
            home_page_type: get("HOME_PAGE_TYPE").unwrap_or(defaults.home_page_type),
            home_page_name: get("HOME_PAGE_NAME").unwrap_or(defaults.home_page_name),
            article_type: get("ARTICLE_TYPE").unwrap_or(defaults.article_type),
            renditions: defaults.renditions,
        };

        Ok(Self {
            client: ClientConfig {
                server_url,
                api_version: get("API_VERSION").unwrap_or_else(|| "v1.1".to_string()),
                channel_token,
                mode,
                authorization,
                timeout_secs,
            },
            assembler,
            port,
            public_dir: get("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()),
        })
    }
}
