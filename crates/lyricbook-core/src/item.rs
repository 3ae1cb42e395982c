use crate::config::{AttributeConfig, TextConfig};

/// Read-only access to an item's attributes.
///
/// Implemented over DOM elements in the web crate and over maps in tests.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

/// Where a text field's content comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentSource {
    /// Fetch from this URL (relative to the page or absolute).
    Remote(String),
    /// Text carried on the item itself.
    Inline(String),
    #[default]
    Absent,
}

impl ContentSource {
    /// A remote source wins over inline text; empty values count as absent.
    pub fn pick(remote: Option<String>, inline: Option<String>) -> Self {
        match (non_empty(remote), non_empty(inline)) {
            (Some(url), _) => Self::Remote(url),
            (None, Some(text)) => Self::Inline(text),
            (None, None) => Self::Absent,
        }
    }
}

/// A list entry as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Item {
    pub search_text: String,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub date: Option<String>,
    pub body: ContentSource,
    pub description: ContentSource,
    /// Serialized link records, parsed on demand.
    pub links_raw: Option<String>,
    pub video_url: Option<String>,
}

impl Item {
    /// Read every attribute the modal and filter care about.
    pub fn from_attributes(src: &impl AttributeSource, attrs: &AttributeConfig) -> Self {
        let get = |name: &str| non_empty(src.attribute(name));
        Self {
            search_text: src.attribute(&attrs.search).unwrap_or_default(),
            title: get(&attrs.title),
            genre: get(&attrs.genre),
            date: get(&attrs.date),
            body: ContentSource::pick(get(&attrs.body_src), get(&attrs.body)),
            description: ContentSource::pick(get(&attrs.desc_src), get(&attrs.desc)),
            links_raw: get(&attrs.links),
            video_url: get(&attrs.youtube),
        }
    }

    /// Title or the configured fallback.
    pub fn display_title<'a>(&'a self, text: &'a TextConfig) -> &'a str {
        self.title.as_deref().unwrap_or(&text.untitled)
    }

    /// Non-empty genre and date joined by the separator.
    pub fn subtitle(&self, text: &TextConfig) -> String {
        [self.genre.as_deref(), self.date.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(text.subtitle_separator.as_str())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::UiConfig;

    impl AttributeSource for HashMap<&str, &str> {
        fn attribute(&self, name: &str) -> Option<String> {
            self.get(name).map(|v| v.to_string())
        }
    }

    fn attrs(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn reads_full_item() {
        let cfg = UiConfig::default();
        let item = Item::from_attributes(
            &attrs(&[
                ("data-search", "yesterday beatles"),
                ("data-lyrics-title", "Yesterday"),
                ("data-lyrics-genre", "Pop"),
                ("data-lyrics-date", "1965"),
                ("data-lyrics-src", "lyrics/yesterday.txt"),
                ("data-lyrics-body", "inline text"),
                ("data-desc-src", "desc/yesterday.txt"),
                ("data-links", r#"[{"url":"https://x","label":"X"}]"#),
                ("data-youtube", "https://youtu.be/abc"),
            ]),
            &cfg.attributes,
        );

        assert_eq!(item.search_text, "yesterday beatles");
        assert_eq!(item.display_title(&cfg.text), "Yesterday");
        assert_eq!(item.subtitle(&cfg.text), "Pop · 1965");
        assert_eq!(item.body, ContentSource::Remote("lyrics/yesterday.txt".into()));
        assert_eq!(item.description, ContentSource::Remote("desc/yesterday.txt".into()));
        assert_eq!(item.video_url.as_deref(), Some("https://youtu.be/abc"));
        assert!(item.links_raw.is_some());
    }

    #[test]
    fn missing_title_uses_fallback() {
        let cfg = UiConfig::default();
        let item = Item::from_attributes(&attrs(&[("data-lyrics-title", "")]), &cfg.attributes);
        assert_eq!(item.display_title(&cfg.text), "Untitled");
    }

    #[test]
    fn subtitle_skips_empty_parts() {
        let cfg = UiConfig::default();
        let only_date = Item::from_attributes(
            &attrs(&[("data-lyrics-genre", ""), ("data-lyrics-date", "2001")]),
            &cfg.attributes,
        );
        assert_eq!(only_date.subtitle(&cfg.text), "2001");

        let neither = Item::default();
        assert_eq!(neither.subtitle(&cfg.text), "");
    }

    #[test]
    fn inline_used_when_no_remote() {
        let cfg = UiConfig::default();
        let item = Item::from_attributes(
            &attrs(&[("data-lyrics-src", ""), ("data-lyrics-body", "la la la")]),
            &cfg.attributes,
        );
        assert_eq!(item.body, ContentSource::Inline("la la la".into()));
        assert_eq!(item.description, ContentSource::Absent);
    }

    #[test]
    fn custom_attribute_names() {
        let mut cfg = UiConfig::default();
        cfg.attributes.title = "data-name".into();
        let item = Item::from_attributes(&attrs(&[("data-name", "Renamed")]), &cfg.attributes);
        assert_eq!(item.title.as_deref(), Some("Renamed"));
    }
}
