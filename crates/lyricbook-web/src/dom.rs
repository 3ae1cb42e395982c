//! Small helpers over `web-sys` shared by the page components.

use lyricbook_core::{AttributeSource, LyricbookError};
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, Window};

/// Inline page config: `<script type="application/toml" data-lyricbook-config>`.
const CONFIG_SELECTOR: &str = "script[data-lyricbook-config]";

/// Item attributes read straight off a DOM element.
pub struct ElementAttrs<'a>(pub &'a Element);

impl AttributeSource for ElementAttrs<'_> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

pub fn js_err(err: JsValue) -> LyricbookError {
    LyricbookError::Dom(
        err.as_string()
            .or_else(|| {
                err.dyn_ref::<js_sys::Error>()
                    .map(|e| String::from(e.message()))
            })
            .unwrap_or_else(|| "unknown js error".into()),
    )
}

pub fn window() -> Result<Window, LyricbookError> {
    web_sys::window().ok_or_else(|| LyricbookError::Dom("no global window".into()))
}

pub fn document() -> Result<Document, LyricbookError> {
    window()?
        .document()
        .ok_or_else(|| LyricbookError::Dom("window has no document".into()))
}

/// First element matching `selector`; invalid selectors count as absent.
pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

pub fn query_html(doc: &Document, selector: &str) -> Option<HtmlElement> {
    query(doc, selector).and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Nearest ancestor-or-self of an event target matching `selector`.
pub fn closest(target: Option<&EventTarget>, selector: &str) -> Option<Element> {
    target?
        .dyn_ref::<Element>()?
        .closest(selector)
        .ok()
        .flatten()
}

/// Set or clear inline `display`; an empty value restores the stylesheet's.
pub fn set_display(el: &Element, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let style = html.style();
        let result = if value.is_empty() {
            style.remove_property("display").map(|_| ())
        } else {
            style.set_property("display", value)
        };
        if let Err(e) = result {
            tracing::debug!(error = %js_err(e), "failed to set display");
        }
    }
}

/// Toggle `overflow: hidden` on the document body.
pub fn lock_body_scroll(doc: &Document, locked: bool) {
    let Some(body) = doc.body() else { return };
    let style = body.style();
    let result = if locked {
        style.set_property("overflow", "hidden")
    } else {
        style.set_property("overflow", "")
    };
    if let Err(e) = result {
        tracing::debug!(error = %js_err(e), "failed to toggle body scroll");
    }
}

/// Text of the inline config override, if the page has one.
pub fn config_override(doc: &Document) -> Option<String> {
    query(doc, CONFIG_SELECTOR).and_then(|el| el.text_content())
}

/// Register a listener for the page's lifetime.
pub fn listen<E, F>(target: &EventTarget, event: &str, handler: F) -> Result<(), LyricbookError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Like [`listen`], but marked passive so scrolling is never blocked.
pub fn listen_passive<E, F>(
    target: &EventTarget,
    event: &str,
    handler: F,
) -> Result<(), LyricbookError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Run `f` on the next animation frame.
pub fn next_frame(f: impl FnOnce() + 'static) -> Result<(), LyricbookError> {
    let callback = Closure::once_into_js(f);
    window()?
        .request_animation_frame(callback.unchecked_ref())
        .map_err(js_err)?;
    Ok(())
}
