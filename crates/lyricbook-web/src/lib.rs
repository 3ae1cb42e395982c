//! Browser entry point for the lyricbook gallery.
//!
//! `start` runs on module instantiation and wires the page once. Page scripts
//! can reach the same controller through [`Lyricbook::current`].

mod dom;
mod fetch;
mod header;
mod logging;
mod modal;
mod page;
mod scrollbar;
mod search;

use std::cell::RefCell;
use std::rc::Rc;

use lyricbook_core::UiConfig;
use wasm_bindgen::prelude::*;

use crate::page::Page;

thread_local! {
    static PAGE: RefCell<Option<Rc<Page>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let document = dom::document().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let (config, config_error) = match dom::config_override(&document) {
        Some(text) if !text.trim().is_empty() => match UiConfig::with_overrides(&text) {
            Ok(config) => (config, None),
            Err(e) => (UiConfig::default(), Some(e)),
        },
        _ => (UiConfig::default(), None),
    };

    logging::init(&config.logging.filter);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring invalid page config");
    }

    let page = Rc::new(Page::new(document, config));
    page.wire();
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

/// Script-facing handle to the wired page.
#[wasm_bindgen]
pub struct Lyricbook {
    page: Rc<Page>,
}

#[wasm_bindgen]
impl Lyricbook {
    /// Handle to the page wired by `start`.
    pub fn current() -> Result<Lyricbook, JsValue> {
        PAGE.with(|slot| slot.borrow().clone())
            .map(|page| Lyricbook { page })
            .ok_or_else(|| JsValue::from_str("lyricbook has not started"))
    }

    /// Apply a search query; returns how many items remain visible.
    pub fn filter(&self, query: &str) -> usize {
        self.page.filter(query)
    }

    /// Open the modal for the item at `index` in document order.
    pub fn open(&self, index: usize) -> bool {
        self.page.open_index(index)
    }

    pub fn close(&self) {
        self.page.close_modal();
    }

    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.page.is_open()
    }
}
