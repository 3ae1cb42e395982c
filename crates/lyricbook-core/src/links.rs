use serde::{Deserialize, Serialize};

/// An external link attached to an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub label: String,
}

impl LinkRecord {
    /// Label to show; falls back to the URL when empty.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.url
        } else {
            &self.label
        }
    }
}

/// Parse an item's serialized link list.
///
/// Never fails: malformed JSON, a non-array value, or a missing attribute all
/// produce an empty list. Records without a URL are dropped.
pub fn parse_links(raw: Option<&str>) -> Vec<LinkRecord> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<LinkRecord>>(raw) {
        Ok(records) => records
            .into_iter()
            .filter(|r| !r.url.trim().is_empty())
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "malformed link list, treating as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records() {
        let links = parse_links(Some(
            r#"[{"url":"https://a.example","label":"Spotify"},{"url":"https://b.example","label":"Apple"}]"#,
        ));
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://a.example");
        assert_eq!(links[1].display_label(), "Apple");
    }

    #[test]
    fn malformed_is_empty() {
        assert!(parse_links(Some("{not json")).is_empty());
        assert!(parse_links(Some(r#"{"url":"https://a"}"#)).is_empty());
        assert!(parse_links(Some("[1, 2]")).is_empty());
    }

    #[test]
    fn missing_or_blank_is_empty() {
        assert!(parse_links(None).is_empty());
        assert!(parse_links(Some("")).is_empty());
        assert!(parse_links(Some("   ")).is_empty());
        assert!(parse_links(Some("[]")).is_empty());
    }

    #[test]
    fn drops_records_without_url() {
        let links = parse_links(Some(r#"[{"label":"nothing"},{"url":"https://ok"}]"#));
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].url, "https://ok");
    }

    #[test]
    fn empty_label_falls_back_to_url() {
        let links = parse_links(Some(r#"[{"url":"https://only-url"}]"#));
        assert_eq!(links[0].display_label(), "https://only-url");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let links = parse_links(Some(r#"[{"url":"https://x","label":"X","kind":"video"}]"#));
        assert_eq!(links, vec![LinkRecord { url: "https://x".into(), label: "X".into() }]);
    }
}
