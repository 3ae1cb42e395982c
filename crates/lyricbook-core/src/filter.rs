use crate::matcher;

/// Result of running the search filter over the item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Visibility per item, in input order.
    pub visible: Vec<bool>,
    pub visible_count: usize,
    /// Show the "no results" indicator: items exist but none match.
    pub show_empty: bool,
}

/// Apply `query` to every item's searchable text.
pub fn apply_filter<S: AsRef<str>>(haystacks: &[S], query: &str) -> FilterOutcome {
    let query = matcher::normalize_query(query);
    let visible: Vec<bool> = haystacks
        .iter()
        .map(|h| matcher::matches(h.as_ref(), &query))
        .collect();
    let visible_count = visible.iter().filter(|v| **v).count();

    tracing::trace!(query = %query, visible_count, total = haystacks.len(), "filter applied");

    FilterOutcome {
        show_empty: !haystacks.is_empty() && visible_count == 0,
        visible,
        visible_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<&'static str> {
        vec![
            "november rain guns n roses rock",
            "yesterday beatles pop",
            "bohemian rhapsody queen rock",
        ]
    }

    #[test]
    fn empty_query_shows_all() {
        let out = apply_filter(&items(), "");
        assert_eq!(out.visible, vec![true, true, true]);
        assert_eq!(out.visible_count, 3);
        assert!(!out.show_empty);
    }

    #[test]
    fn whitespace_query_shows_all() {
        let out = apply_filter(&items(), "   ");
        assert_eq!(out.visible_count, 3);
    }

    #[test]
    fn partial_match() {
        let out = apply_filter(&items(), "  ROCK ");
        assert_eq!(out.visible, vec![true, false, true]);
        assert_eq!(out.visible_count, 2);
        assert!(!out.show_empty);
    }

    #[test]
    fn no_match_shows_empty_indicator() {
        let out = apply_filter(&items(), "jazz");
        assert_eq!(out.visible, vec![false, false, false]);
        assert!(out.show_empty);
    }

    #[test]
    fn no_items_never_shows_empty_indicator() {
        let none: Vec<String> = Vec::new();
        let out = apply_filter(&none, "anything");
        assert!(out.visible.is_empty());
        assert_eq!(out.visible_count, 0);
        assert!(!out.show_empty);
    }

    #[test]
    fn visibility_matches_predicate_for_every_item() {
        let haystacks = items();
        for query in ["", "r", "Queen", "pop rock", "beatles", "zzz", " Rain "] {
            let out = apply_filter(&haystacks, query);
            let q = matcher::normalize_query(query);
            for (h, v) in haystacks.iter().zip(&out.visible) {
                assert_eq!(*v, h.to_lowercase().contains(&q), "query {query:?} on {h:?}");
            }
            assert_eq!(out.show_empty, out.visible_count == 0);
        }
    }

    #[test]
    fn uppercase_haystack_is_matched() {
        let out = apply_filter(&["MIXED Case Title"], "case");
        assert_eq!(out.visible, vec![true]);
    }
}
