use lyricbook_core::loader::TextFetcher;
use lyricbook_core::FetchError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

/// `fetch()`-backed text fetcher. Every request bypasses the HTTP cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserFetcher;

impl TextFetcher for BrowserFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_cache(RequestCache::NoStore);

        let request = Request::new_with_str_and_init(url, &init).map_err(network)?;
        let window =
            web_sys::window().ok_or_else(|| FetchError::Network("no global window".into()))?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;

        if !response.ok() {
            return Err(FetchError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let body = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?;
        body.as_string()
            .ok_or_else(|| FetchError::Network("response body is not text".into()))
    }
}

fn network(err: JsValue) -> FetchError {
    let message = err
        .as_string()
        .or_else(|| {
            err.dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "request failed".into());
    FetchError::Network(message)
}
