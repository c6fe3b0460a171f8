//! Rendition URL sets.
//!
//! Walks the configured rendition names in order and, for each, the jpg and
//! webp formats. jpg entries fill the named URL map and `jpg_srcset`; webp
//! entries fill `srcset`. The native image is appended last to `srcset` so a
//! renderer always has the original as a fallback.

use std::collections::BTreeMap;

use crate::content::types::{Dimensions, Rendition};
use crate::site::view_models::RenditionUrlSet;

pub const FORMATS: [&str; 2] = ["jpg", "webp"];

pub fn build_rendition_url_set<S: AsRef<str>>(
    renditions: &[Rendition],
    native_url: &str,
    metadata: Dimensions,
    rendition_names: &[S],
) -> RenditionUrlSet {
    let mut srcset = String::new();
    let mut jpg_srcset = String::new();
    let mut named = BTreeMap::new();

    for name in rendition_names {
        let name = name.as_ref();
        let Some(rendition) = renditions.iter().find(|r| r.name.eq_ignore_ascii_case(name)) else {
            continue;
        };

        for format in FORMATS {
            let Some(entry) = rendition.format(format) else {
                continue;
            };
            let Some(url) = entry.self_href() else {
                continue;
            };

            if format == "jpg" {
                named.insert(name.to_ascii_lowercase(), url.to_string());
            }
            // No width, no srcset token; the named URL above still applies.
            let Some(width) = entry.metadata.width else {
                continue;
            };
            let target = if format == "jpg" { &mut jpg_srcset } else { &mut srcset };
            target.push_str(&format!("{} {}w,", url, width));
        }
    }

    match metadata.width {
        Some(width) => srcset.push_str(&format!("{} {}w", native_url, width)),
        None => srcset.push_str(native_url),
    }

    RenditionUrlSet {
        srcset,
        jpg_srcset,
        native: native_url.to_string(),
        width: metadata.width,
        height: metadata.height,
        named,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::types::{Link, RenditionFormat};

    fn format(format: &str, url: &str, width: Option<u32>) -> RenditionFormat {
        RenditionFormat {
            format: format.to_string(),
            links: vec![Link { rel: "self".to_string(), href: url.to_string() }],
            metadata: Dimensions { width, height: None },
        }
    }

    fn rendition(name: &str, formats: Vec<RenditionFormat>) -> Rendition {
        Rendition { name: name.to_string(), formats }
    }

    fn native_dims() -> Dimensions {
        Dimensions { width: Some(800), height: Some(600) }
    }

    #[test]
    fn test_single_small_rendition() {
        let renditions = vec![rendition(
            "Small",
            vec![format("jpg", "A", Some(100)), format("webp", "B", Some(100))],
        )];
        let set = build_rendition_url_set(&renditions, "N", native_dims(), &["Small", "Medium", "Large"]);

        assert_eq!(set.jpg_srcset, "A 100w,");
        assert_eq!(set.srcset, "B 100w,N 800w");
        assert_eq!(set.small(), Some("A"));
        assert_eq!(set.medium(), None);
        assert_eq!(set.native, "N");
        assert_eq!(set.width, Some(800));
        assert_eq!(set.height, Some(600));
    }

    #[test]
    fn test_order_follows_configured_names_not_upstream() {
        // Upstream lists Large first; output follows the configured order.
        let renditions = vec![
            rendition("Large", vec![format("jpg", "L.jpg", Some(1000)), format("webp", "L.webp", Some(1000))]),
            rendition("Small", vec![format("jpg", "S.jpg", Some(100)), format("webp", "S.webp", Some(100))]),
            rendition("Medium", vec![format("jpg", "M.jpg", Some(500)), format("webp", "M.webp", Some(500))]),
        ];
        let set = build_rendition_url_set(&renditions, "N", native_dims(), &["Small", "Medium", "Large"]);

        assert_eq!(set.jpg_srcset, "S.jpg 100w,M.jpg 500w,L.jpg 1000w,");
        assert_eq!(set.srcset, "S.webp 100w,M.webp 500w,L.webp 1000w,N 800w");
        assert_eq!(set.large(), Some("L.jpg"));
    }

    #[test]
    fn test_missing_formats_are_skipped() {
        let renditions = vec![
            rendition("Small", vec![format("webp", "S.webp", Some(100))]),
            rendition("Medium", vec![format("jpg", "M.jpg", Some(500))]),
            rendition("Custom", vec![format("jpg", "C.jpg", Some(50))]),
        ];
        let set = build_rendition_url_set(&renditions, "N", native_dims(), &["Small", "Medium"]);

        assert_eq!(set.small(), None);
        assert_eq!(set.medium(), Some("M.jpg"));
        assert_eq!(set.get("custom"), None);
        assert_eq!(set.jpg_srcset, "M.jpg 500w,");
        assert_eq!(set.srcset, "S.webp 100w,N 800w");
    }

    #[test]
    fn test_no_renditions_still_has_native_fallback() {
        let set = build_rendition_url_set::<&str>(&[], "N", Dimensions::default(), &[]);
        assert_eq!(set.srcset, "N");
        assert_eq!(set.jpg_srcset, "");
        assert_eq!(set.src_or_native("thumbnail"), "N");
    }

    #[test]
    fn test_entry_without_width_keeps_named_url() {
        let renditions = vec![rendition("Thumbnail", vec![format("jpg", "T.jpg", None)])];
        let set = build_rendition_url_set(&renditions, "N", native_dims(), &["Thumbnail"]);
        assert_eq!(set.thumbnail(), Some("T.jpg"));
        assert_eq!(set.jpg_srcset, "");
    }

    #[test]
    fn test_deterministic() {
        let renditions = vec![
            rendition("Medium", vec![format("jpg", "M.jpg", Some(500))]),
            rendition("Small", vec![format("jpg", "S.jpg", Some(100))]),
        ];
        let names = ["Small", "Medium"];
        let a = build_rendition_url_set(&renditions, "N", native_dims(), &names);
        let b = build_rendition_url_set(&renditions, "N", native_dims(), &names);
        assert_eq!(a, b);
    }
}
