//! Resolves the modal's body and description text.
//!
//! Each field is resolved independently: a remote source is fetched, inline
//! text is used as-is, and anything else falls back to a literal message.
//! Every modal open takes a fresh [`RequestToken`]; results whose token is no
//! longer current are dropped so a slow fetch for an earlier item cannot
//! overwrite a later one.

use std::cell::Cell;
use std::future::Future;

use url::Url;

use crate::config::TextConfig;
use crate::error::{FetchError, LyricbookError};
use crate::item::ContentSource;

/// Fetches a URL as plain text, bypassing caches.
pub trait TextFetcher {
    fn fetch_text(&self, url: &str) -> impl Future<Output = Result<String, FetchError>>;
}

/// Identifies one modal open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Monotonic counter handing out request tokens.
#[derive(Debug, Default)]
pub struct RequestCounter {
    current: Cell<u64>,
}

impl RequestCounter {
    /// Start a new request, invalidating all earlier tokens.
    pub fn begin(&self) -> RequestToken {
        let next = self.current.get().wrapping_add(1);
        self.current.set(next);
        RequestToken(next)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current.get() == token.0
    }
}

/// Which modal region a text is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Body,
    Description,
}

pub struct DetailLoader<F> {
    fetcher: F,
    counter: RequestCounter,
    text: TextConfig,
    base_url: Option<Url>,
}

impl<F: TextFetcher> DetailLoader<F> {
    pub fn new(fetcher: F, text: TextConfig) -> Self {
        Self {
            fetcher,
            counter: RequestCounter::default(),
            text,
            base_url: None,
        }
    }

    /// Resolve relative sources against `base` (usually the document URL).
    pub fn set_base_url(&mut self, base: &str) -> Result<(), LyricbookError> {
        let url = Url::parse(base)
            .map_err(|e| LyricbookError::Config(format!("invalid base URL {base}: {e}")))?;
        self.base_url = Some(url);
        Ok(())
    }

    pub fn begin(&self) -> RequestToken {
        self.counter.begin()
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.counter.is_current(token)
    }

    /// Resolve `source` for `field`, then drop the result if `token` went stale.
    pub async fn load(
        &self,
        token: RequestToken,
        field: Field,
        source: &ContentSource,
    ) -> Option<String> {
        let text = self.resolve(field, source).await;
        if self.is_current(token) {
            Some(text)
        } else {
            tracing::debug!(?field, "discarding stale detail result");
            None
        }
    }

    /// Produce the text for a field without any staleness check.
    pub async fn resolve(&self, field: Field, source: &ContentSource) -> String {
        match source {
            ContentSource::Remote(src) => match self.fetch(src).await {
                Ok(text) => text,
                Err(e) => self.on_failure(field, src, &e),
            },
            ContentSource::Inline(text) => text.clone(),
            ContentSource::Absent => match field {
                Field::Body => self.text.no_lyrics.clone(),
                Field::Description => self.text.description_fallback.clone(),
            },
        }
    }

    async fn fetch(&self, src: &str) -> Result<String, FetchError> {
        let url = self.resolve_url(src)?;
        self.fetcher.fetch_text(&url).await
    }

    /// Absolute form of `src`; unchanged when no base URL is set.
    pub fn resolve_url(&self, src: &str) -> Result<String, FetchError> {
        match &self.base_url {
            Some(base) => base
                .join(src)
                .map(String::from)
                .map_err(|e| FetchError::InvalidUrl {
                    url: src.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(src.to_string()),
        }
    }

    // Body failures are visible to the user; description failures are not.
    fn on_failure(&self, field: Field, src: &str, err: &FetchError) -> String {
        match field {
            Field::Body => {
                tracing::warn!(src, error = %err, "failed to load lyrics");
                self.text.lyrics_failed.clone()
            }
            Field::Description => {
                tracing::debug!(src, error = %err, "failed to load description");
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;
    use crate::config::UiConfig;

    /// Fetcher answering from a table after a per-URL delay.
    #[derive(Default)]
    struct FakeFetcher {
        routes: HashMap<String, (Duration, Result<String, FetchError>)>,
        requested: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn ok(mut self, url: &str, delay_ms: u64, body: &str) -> Self {
            self.routes.insert(
                url.into(),
                (Duration::from_millis(delay_ms), Ok(body.into())),
            );
            self
        }

        fn fail(mut self, url: &str, err: FetchError) -> Self {
            self.routes.insert(url.into(), (Duration::ZERO, Err(err)));
            self
        }
    }

    impl TextFetcher for FakeFetcher {
        async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            self.requested.borrow_mut().push(url.to_string());
            match self.routes.get(url) {
                Some((delay, result)) => {
                    tokio::time::sleep(*delay).await;
                    result.clone()
                }
                None => Err(FetchError::Status {
                    status: 404,
                    url: url.to_string(),
                }),
            }
        }
    }

    fn loader(fetcher: FakeFetcher) -> DetailLoader<FakeFetcher> {
        DetailLoader::new(fetcher, UiConfig::default().text)
    }

    fn remote(url: &str) -> ContentSource {
        ContentSource::Remote(url.into())
    }

    #[test]
    fn tokens_are_monotonic() {
        let counter = RequestCounter::default();
        let a = counter.begin();
        assert!(counter.is_current(a));
        let b = counter.begin();
        assert!(!counter.is_current(a));
        assert!(counter.is_current(b));
        assert_ne!(a, b);
    }

    #[tokio::test(start_paused = true)]
    async fn remote_body_is_used_verbatim() {
        let l = loader(FakeFetcher::default().ok("a.txt", 10, "  line one\nline two\n"));
        let text = l.resolve(Field::Body, &remote("a.txt")).await;
        assert_eq!(text, "  line one\nline two\n");
    }

    #[tokio::test(start_paused = true)]
    async fn inline_and_fallbacks() {
        let l = loader(FakeFetcher::default());
        assert_eq!(
            l.resolve(Field::Body, &ContentSource::Inline("inline".into())).await,
            "inline"
        );
        assert_eq!(l.resolve(Field::Body, &ContentSource::Absent).await, "(No lyrics found.)");
        assert_eq!(
            l.resolve(Field::Description, &ContentSource::Absent).await,
            "Description: TODO"
        );
        assert!(l.fetcher.requested.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn body_failure_shows_message() {
        let l = loader(
            FakeFetcher::default().fail("down.txt", FetchError::Network("offline".into())),
        );
        assert_eq!(l.resolve(Field::Body, &remote("down.txt")).await, "Failed to load lyrics.");
        assert_eq!(l.resolve(Field::Body, &remote("missing.txt")).await, "Failed to load lyrics.");
    }

    #[tokio::test(start_paused = true)]
    async fn description_failure_is_silent() {
        let l = loader(FakeFetcher::default());
        assert_eq!(l.resolve(Field::Description, &remote("missing.txt")).await, "");
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_open_never_writes() {
        let l = loader(
            FakeFetcher::default()
                .ok("a.txt", 500, "lyrics A")
                .ok("b.txt", 50, "lyrics B"),
        );
        let shown = RefCell::new(String::from("Loading…"));

        let open_a = async {
            let token = l.begin();
            if let Some(text) = l.load(token, Field::Body, &remote("a.txt")).await {
                *shown.borrow_mut() = text;
            }
        };
        let open_b = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let token = l.begin();
            if let Some(text) = l.load(token, Field::Body, &remote("b.txt")).await {
                *shown.borrow_mut() = text;
            }
        };
        futures::join!(open_a, open_b);

        assert_eq!(*shown.borrow(), "lyrics B");
    }

    #[tokio::test(start_paused = true)]
    async fn stale_result_still_fetched() {
        let l = loader(FakeFetcher::default().ok("a.txt", 100, "A"));
        let stale = l.begin();
        let _fresh = l.begin();
        assert_eq!(l.load(stale, Field::Body, &remote("a.txt")).await, None);
        assert_eq!(l.fetcher.requested.borrow().as_slice(), ["a.txt"]);
    }

    #[tokio::test(start_paused = true)]
    async fn body_and_description_resolve_independently() {
        let l = loader(
            FakeFetcher::default()
                .ok("body.txt", 300, "body")
                .ok("desc.txt", 20, "desc"),
        );
        let order = RefCell::new(Vec::new());
        let token = l.begin();

        let body = async {
            if let Some(t) = l.load(token, Field::Body, &remote("body.txt")).await {
                order.borrow_mut().push(t);
            }
        };
        let desc = async {
            if let Some(t) = l.load(token, Field::Description, &remote("desc.txt")).await {
                order.borrow_mut().push(t);
            }
        };
        futures::join!(body, desc);

        assert_eq!(*order.borrow(), vec!["desc".to_string(), "body".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn relative_sources_resolve_against_base() {
        let mut l = loader(FakeFetcher::default().ok(
            "https://site.example/lyrics/song.txt",
            0,
            "resolved",
        ));
        l.set_base_url("https://site.example/lyrics/index.html").unwrap();

        assert_eq!(l.resolve(Field::Body, &remote("song.txt")).await, "resolved");
        assert_eq!(
            l.resolve_url("https://cdn.example/x.txt").unwrap(),
            "https://cdn.example/x.txt"
        );
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let mut l = loader(FakeFetcher::default());
        assert!(matches!(l.set_base_url("not a url"), Err(LyricbookError::Config(_))));
        assert_eq!(l.resolve_url("song.txt").unwrap(), "song.txt");
    }
}
