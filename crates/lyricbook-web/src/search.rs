use std::rc::Rc;

use lyricbook_core::filter;
use lyricbook_core::{LyricbookError, UiConfig};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::dom;

/// Search box bound to the item list.
pub struct SearchFilter {
    input: HtmlInputElement,
    empty: Option<Element>,
    /// Items paired with their searchable text, read once at setup.
    items: Vec<(Element, String)>,
}

impl SearchFilter {
    /// Requires the search input and at least one item.
    pub fn attach(doc: &Document, config: &UiConfig) -> Option<Self> {
        let input = dom::query(doc, &config.selectors.search_input)?
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        let items: Vec<(Element, String)> = dom::query_all(doc, &config.selectors.item)
            .into_iter()
            .map(|el| {
                let text = el.get_attribute(&config.attributes.search).unwrap_or_default();
                (el, text)
            })
            .collect();
        if items.is_empty() {
            return None;
        }

        Some(Self {
            input,
            empty: dom::query(doc, &config.selectors.empty),
            items,
        })
    }

    /// Show matching items, hide the rest, and toggle the empty indicator.
    pub fn filter(&self, query: &str) -> usize {
        let haystacks: Vec<&str> = self.items.iter().map(|(_, text)| text.as_str()).collect();
        let outcome = filter::apply_filter(&haystacks, query);

        for ((el, _), visible) in self.items.iter().zip(&outcome.visible) {
            dom::set_display(el, if *visible { "" } else { "none" });
        }
        if let Some(empty) = &self.empty {
            dom::set_display(empty, if outcome.show_empty { "block" } else { "none" });
        }
        outcome.visible_count
    }

    /// Show everything, then refilter on every input event.
    pub fn wire(self: &Rc<Self>) -> Result<(), LyricbookError> {
        self.filter("");

        let this = Rc::clone(self);
        dom::listen(&self.input, "input", move |_: Event| {
            this.filter(&this.input.value());
        })?;

        tracing::debug!(items = self.items.len(), "search filter wired");
        Ok(())
    }
}
