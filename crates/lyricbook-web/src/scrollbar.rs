//! Custom scrollbar: keeps the handle in step with the modal scroll region and
//! lets the track and handle drive scrolling.

use std::cell::Cell;
use std::rc::Rc;

use lyricbook_core::collapse::FrameThrottle;
use lyricbook_core::scrollbar::{DragState, ScrollMetrics, TrackMetrics};
use lyricbook_core::{LyricbookError, UiConfig};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent, Node, PointerEvent};

use crate::dom;

pub struct ScrollbarSync {
    region: Element,
    track: HtmlElement,
    handle: HtmlElement,
    drag: Cell<DragState>,
    throttle: FrameThrottle,
}

impl ScrollbarSync {
    /// Requires the scroll region, the track and the handle.
    pub fn attach(doc: &Document, config: &UiConfig) -> Option<Self> {
        let s = &config.selectors;
        Some(Self {
            region: dom::query(doc, &s.modal_scroll)?,
            track: dom::query_html(doc, &s.scroll_track)?,
            handle: dom::query_html(doc, &s.scroll_handle)?,
            drag: Cell::new(DragState::default()),
            throttle: FrameThrottle::default(),
        })
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_top: f64::from(self.region.scroll_top()),
            scroll_height: f64::from(self.region.scroll_height()),
            client_height: f64::from(self.region.client_height()),
        }
    }

    fn track_metrics(&self) -> TrackMetrics {
        TrackMetrics {
            track_height: f64::from(self.track.client_height()),
            handle_height: f64::from(self.handle.offset_height()),
        }
    }

    /// Move the handle to match the region's current scroll ratio.
    pub fn sync(&self) {
        let top = self.track_metrics().handle_top(&self.scroll_metrics());
        if let Err(e) = self
            .handle
            .style()
            .set_property("transform", &format!("translateY({top}px)"))
        {
            tracing::debug!(error = %dom::js_err(e), "failed to move scroll handle");
        }
    }

    /// Sync on the next animation frame, coalescing repeated requests.
    pub fn schedule_sync(self: &Rc<Self>) {
        if !self.throttle.request() {
            return;
        }
        let this = Rc::clone(self);
        if let Err(e) = dom::next_frame(move || {
            this.throttle.take();
            this.sync();
        }) {
            self.throttle.take();
            tracing::debug!(error = %e, "animation frame unavailable, syncing now");
            self.sync();
        }
    }

    fn scroll_to_ratio(&self, ratio: f64) {
        let target = self.scroll_metrics().scroll_top_for(ratio);
        self.region.set_scroll_top(target.round() as i32);
        self.sync();
    }

    fn pointer_in_track(&self, client_y: f64) -> f64 {
        client_y - self.track.get_bounding_client_rect().top()
    }

    pub fn wire(self: &Rc<Self>) -> Result<(), LyricbookError> {
        let window = dom::window()?;

        let this = Rc::clone(self);
        dom::listen_passive(&self.region, "scroll", move |_: Event| {
            this.schedule_sync();
        })?;

        let this = Rc::clone(self);
        dom::listen(&self.track, "click", move |e: MouseEvent| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            if target.is_some_and(|t| this.handle.contains(Some(&t))) {
                return;
            }
            let offset = this.pointer_in_track(f64::from(e.client_y()));
            this.scroll_to_ratio(this.track_metrics().ratio_for_click(offset));
        })?;

        let this = Rc::clone(self);
        dom::listen(&self.handle, "pointerdown", move |e: PointerEvent| {
            let mut drag = this.drag.get();
            let grab = f64::from(e.client_y()) - this.handle.get_bounding_client_rect().top();
            if !drag.begin(grab) {
                return;
            }
            this.drag.set(drag);
            e.prevent_default();
            if let Err(err) = this.handle.set_pointer_capture(e.pointer_id()) {
                tracing::debug!(error = %dom::js_err(err), "pointer capture failed");
            }
        })?;

        let this = Rc::clone(self);
        dom::listen(&window, "pointermove", move |e: PointerEvent| {
            let pointer = this.pointer_in_track(f64::from(e.client_y()));
            if let Some(ratio) = this.drag.get().ratio_at(pointer, &this.track_metrics()) {
                this.scroll_to_ratio(ratio);
            }
        })?;

        for event in ["pointerup", "pointercancel"] {
            let this = Rc::clone(self);
            dom::listen(&window, event, move |e: PointerEvent| {
                let mut drag = this.drag.get();
                if drag.end() {
                    this.drag.set(drag);
                    // Capture may already be gone if the element was released by the browser.
                    let _ = this.handle.release_pointer_capture(e.pointer_id());
                }
            })?;
        }

        self.sync();
        tracing::debug!("custom scrollbar wired");
        Ok(())
    }
}
