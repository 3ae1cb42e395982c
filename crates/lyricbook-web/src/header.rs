use std::rc::Rc;

use lyricbook_core::collapse::HeaderCollapse;
use lyricbook_core::{LyricbookError, UiConfig};
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::dom;

/// What the header watches: a dedicated container, or the window itself.
enum ScrollSource {
    Container(Element),
    Window(Window),
}

impl ScrollSource {
    fn offset(&self) -> f64 {
        match self {
            Self::Container(el) => f64::from(el.scroll_top()),
            Self::Window(w) => w.scroll_y().unwrap_or(0.0),
        }
    }

    fn target(&self) -> &EventTarget {
        match self {
            Self::Container(el) => el.as_ref(),
            Self::Window(w) => w.as_ref(),
        }
    }
}

pub struct CollapsingHeader {
    header: Element,
    source: ScrollSource,
    state: HeaderCollapse,
    class: String,
}

impl CollapsingHeader {
    pub fn attach(doc: &Document, config: &UiConfig) -> Option<Self> {
        let header = dom::query(doc, &config.selectors.header)?;
        let source = match dom::query(doc, &config.selectors.scroll_container) {
            Some(el) => ScrollSource::Container(el),
            None => ScrollSource::Window(web_sys::window()?),
        };
        Some(Self {
            header,
            source,
            state: HeaderCollapse::new(config.behavior.collapse_threshold),
            class: config.classes.header_collapsed.clone(),
        })
    }

    fn update(&self) {
        let collapsed = self.state.is_collapsed_at(self.source.offset());
        if let Err(e) = self
            .header
            .class_list()
            .toggle_with_force(&self.class, collapsed)
        {
            tracing::debug!(error = %dom::js_err(e), "failed to toggle header class");
        }
    }

    fn schedule_update(self: &Rc<Self>) {
        if !self.state.throttle().request() {
            return;
        }
        let this = Rc::clone(self);
        if let Err(e) = dom::next_frame(move || {
            this.state.throttle().take();
            this.update();
        }) {
            self.state.throttle().take();
            tracing::debug!(error = %e, "animation frame unavailable, updating now");
            self.update();
        }
    }

    pub fn wire(self: &Rc<Self>) -> Result<(), LyricbookError> {
        let this = Rc::clone(self);
        dom::listen_passive(self.source.target(), "scroll", move |_: Event| {
            this.schedule_update();
        })?;
        self.update();
        Ok(())
    }
}
