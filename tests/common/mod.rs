//! Shared fixtures: a small content repository shaped like the sample blog
//! (home page, three topics, articles, an author, digital assets).

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use content_site::content::ContentItem;
use content_site::{AssemblerConfig, ContentClient, InMemoryClient, ViewModelAssembler};
use serde_json::{json, Value};

pub const HOME_TYPE: &str = "OCEGettingStartedHomePage";
pub const TOPIC_TYPE: &str = "OCEGettingStartedTopic";
pub const ARTICLE_TYPE: &str = "OCEGettingStartedArticle";
pub const AUTHOR_TYPE: &str = "OCEGettingStartedAuthor";

pub fn item(value: Value) -> ContentItem {
    serde_json::from_value(value).expect("fixture item")
}

/// Digital asset with Thumbnail/Small/Medium/Large renditions in jpg and webp.
pub fn asset(id: &str) -> ContentItem {
    let base = format!("https://cdn.example.com/{}", id);
    let renditions: Vec<Value> = [("Thumbnail", 150), ("Small", 300), ("Medium", 600), ("Large", 1000)]
        .iter()
        .map(|(name, width)| {
            json!({
                "name": name,
                "type": "system",
                "formats": [
                    {
                        "format": "jpg",
                        "links": [{"rel": "self", "href": format!("{}/{}.jpg", base, name.to_lowercase()), "method": "GET"}],
                        "metadata": {"width": width, "height": width * 2 / 3}
                    },
                    {
                        "format": "webp",
                        "links": [{"rel": "self", "href": format!("{}/{}.webp", base, name.to_lowercase()), "method": "GET"}],
                        "metadata": {"width": width, "height": width * 2 / 3}
                    }
                ]
            })
        })
        .collect();

    item(json!({
        "id": id,
        "type": "DigitalAsset",
        "name": format!("{}.jpg", id),
        "fields": {
            "renditions": renditions,
            "native": {"links": [{"href": format!("{}/native", base), "rel": "self"}]},
            "metadata": {"width": 1600, "height": 1067}
        }
    }))
}

pub fn home_page(topic_ids: &[&str]) -> ContentItem {
    let topics: Vec<Value> = topic_ids.iter().map(|id| json!({"id": id})).collect();
    item(json!({
        "id": "HOME",
        "type": HOME_TYPE,
        "name": "HomePage",
        "fields": {
            "company_name": "Café Supremo",
            "company_logo": {"id": "LOGO", "type": "DigitalAsset"},
            "about_url": "https://example.com/about",
            "contact_url": "https://example.com/contact",
            "topics": topics
        }
    }))
}

pub fn topic(id: &str, name: &str) -> ContentItem {
    item(json!({
        "id": id,
        "type": TOPIC_TYPE,
        "name": name,
        "description": format!("All about {}", name),
        "fields": {"thumbnail": {"id": format!("IMG_{}", id)}}
    }))
}

pub fn article(id: &str, topic_id: &str, name: &str, published: &str, content: &str) -> ContentItem {
    item(json!({
        "id": id,
        "type": ARTICLE_TYPE,
        "name": name,
        "description": format!("Summary of {}", name),
        "fields": {
            "topic": {"id": topic_id},
            "author": {"id": "AUTH1"},
            "image": {"id": format!("IMG_{}", id)},
            "image_caption": format!("Caption for {}", name),
            "published_date": {"value": published, "timezone": "UTC"},
            "article_content": content
        }
    }))
}

pub fn author() -> ContentItem {
    item(json!({
        "id": "AUTH1",
        "type": AUTHOR_TYPE,
        "name": "Jane Barista",
        "fields": {"avatar": {"id": "AVATAR1"}}
    }))
}

/// Three topics; "Coffee" (T1) has three articles, "Tea" (T2) has none.
pub fn blog_client() -> InMemoryClient {
    InMemoryClient::new().with_items([
        home_page(&["T1", "T2", "T3"]),
        topic("T1", "Coffee"),
        topic("T2", "Tea"),
        topic("T3", "Recipes"),
        article("A1", "T1", "Roasting Basics", "2021-01-10T09:00:00.000Z",
            "<p>Fresh <strong>beans</strong></p><script>alert(1)</script>"),
        article("A2", "T1", "Grinding Guide", "2021-03-03T10:15:00.000Z", "Plain words only"),
        article("A3", "T1", "Brewing at Home", "2020-11-20T08:00:00.000Z", "<p>Pour over</p>"),
        author(),
        asset("LOGO"),
        asset("IMG_T1"),
        asset("IMG_T2"),
        asset("IMG_T3"),
        asset("IMG_A1"),
        asset("IMG_A2"),
        asset("IMG_A3"),
        asset("AVATAR1"),
    ])
}

pub fn assembler(client: InMemoryClient) -> ViewModelAssembler {
    let client: Arc<dyn ContentClient> = Arc::new(client);
    ViewModelAssembler::new(client, AssemblerConfig::default())
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
