//! The page controller: owns every component and the modal's state.

use std::cell::RefCell;
use std::rc::Rc;

use lyricbook_core::loader::{DetailLoader, Field, RequestToken};
use lyricbook_core::modal::{ModalController, ModalEffects, ModalState};
use lyricbook_core::routing::{self, ClickContext, ClickIntent};
use lyricbook_core::{ContentSource, Item, LyricbookError, UiConfig};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, KeyboardEvent, MouseEvent};

use crate::dom::{self, ElementAttrs};
use crate::fetch::BrowserFetcher;
use crate::header::CollapsingHeader;
use crate::modal::ModalView;
use crate::scrollbar::ScrollbarSync;
use crate::search::SearchFilter;

pub struct Page {
    config: UiConfig,
    document: Document,
    search: Option<Rc<SearchFilter>>,
    modal: Option<ModalView>,
    scrollbar: Option<Rc<ScrollbarSync>>,
    header: Option<Rc<CollapsingHeader>>,
    loader: DetailLoader<BrowserFetcher>,
    controller: RefCell<ModalController>,
}

impl Page {
    /// Resolve every optional component against the current document.
    pub fn new(document: Document, config: UiConfig) -> Self {
        let mut loader = DetailLoader::new(BrowserFetcher, config.text.clone());
        if let Some(base) = document.base_uri().ok().flatten() {
            if let Err(e) = loader.set_base_url(&base) {
                tracing::warn!(error = %e, "item sources will not be resolved against the page URL");
            }
        }

        Self {
            search: SearchFilter::attach(&document, &config).map(Rc::new),
            modal: ModalView::attach(&document, &config),
            scrollbar: ScrollbarSync::attach(&document, &config).map(Rc::new),
            header: CollapsingHeader::attach(&document, &config).map(Rc::new),
            controller: RefCell::new(ModalController::default()),
            loader,
            document,
            config,
        }
    }

    /// Wire each present component. A component that fails to wire is logged
    /// and skipped; the rest still run.
    pub fn wire(self: &Rc<Self>) {
        if let Some(search) = &self.search {
            report("search", search.wire());
        }
        if let Some(scrollbar) = &self.scrollbar {
            report("scrollbar", scrollbar.wire());
        }
        if let Some(header) = &self.header {
            report("header", header.wire());
        }
        if self.modal.is_some() {
            report("modal", self.wire_modal());
        }

        tracing::info!(
            search = self.search.is_some(),
            modal = self.modal.is_some(),
            scrollbar = self.scrollbar.is_some(),
            header = self.header.is_some(),
            "page wired"
        );
    }

    fn wire_modal(self: &Rc<Self>) -> Result<(), LyricbookError> {
        let this = Rc::clone(self);
        dom::listen(&self.document, "click", move |e: MouseEvent| {
            this.on_click(&e);
        })?;

        let this = Rc::clone(self);
        dom::listen(&self.document, "keydown", move |e: KeyboardEvent| {
            let effects = this.controller.borrow_mut().handle_key(&e.key());
            if let Some(effects) = effects {
                this.apply_modal(effects);
            }
        })?;
        Ok(())
    }

    fn on_click(self: &Rc<Self>, e: &MouseEvent) {
        let s = &self.config.selectors;
        let target = e.target();

        let item = dom::closest(target.as_ref(), &s.item);
        let page_mode = self
            .document
            .body()
            .and_then(|b| b.get_attribute(&self.config.attributes.page_mode));
        let ctx = ClickContext {
            on_close_control: dom::closest(target.as_ref(), &s.modal_close).is_some(),
            inside_item: item.is_some(),
            on_open_affordance: dom::closest(target.as_ref(), &s.open_modal).is_some(),
            on_interactive: dom::closest(target.as_ref(), &s.interactive).is_some(),
            page_mode: page_mode.as_deref(),
        };

        match (routing::route_click(&ctx, &self.config.behavior), item) {
            (ClickIntent::CloseModal, _) => self.close_modal(),
            (ClickIntent::OpenModal, Some(item)) => self.open_element(&item),
            (ClickIntent::OpenFirstLink, Some(item)) => self.open_first_link(&item),
            _ => {}
        }
    }

    /// Open the modal for an item element.
    pub fn open_element(self: &Rc<Self>, el: &Element) {
        let Some(view) = &self.modal else { return };
        let item = Item::from_attributes(&ElementAttrs(el), &self.config.attributes);

        let (content, effects) = self.controller.borrow_mut().open(&item, &self.config.text);
        view.render(&self.document, &content, &self.config.classes);
        view.apply(&self.document, effects, &self.config.classes);
        self.resync_scrollbar();

        let token = self.loader.begin();
        self.spawn_field(token, Field::Body, item.body);
        self.spawn_field(token, Field::Description, item.description);
    }

    /// Open the item at `index` in document order.
    pub fn open_index(self: &Rc<Self>, index: usize) -> bool {
        match dom::query_all(&self.document, &self.config.selectors.item).get(index) {
            Some(el) => {
                self.open_element(el);
                true
            }
            None => false,
        }
    }

    /// Close the modal. Closing an already-closed modal changes nothing.
    pub fn close_modal(&self) {
        let effects = self.controller.borrow_mut().close();
        if let Some(effects) = effects {
            self.apply_modal(effects);
        }
    }

    fn apply_modal(&self, effects: ModalEffects) {
        if let Some(view) = &self.modal {
            view.apply(&self.document, effects, &self.config.classes);
            tracing::debug!(active = effects.active, "modal state applied");
        }
    }

    pub fn is_open(&self) -> bool {
        self.controller.borrow().state() == ModalState::Open
    }

    /// Run the search filter; returns the number of visible items.
    pub fn filter(&self, query: &str) -> usize {
        self.search.as_ref().map_or(0, |s| s.filter(query))
    }

    fn spawn_field(self: &Rc<Self>, token: RequestToken, field: Field, source: ContentSource) {
        let page = Rc::clone(self);
        spawn_local(async move {
            let Some(text) = page.loader.load(token, field, &source).await else {
                return;
            };
            if let Some(view) = &page.modal {
                match field {
                    Field::Body => view.set_body(&text),
                    Field::Description => view.set_description(&text),
                }
            }
            page.resync_scrollbar();
        });
    }

    fn open_first_link(&self, el: &Element) {
        let item = Item::from_attributes(&ElementAttrs(el), &self.config.attributes);
        let Some(url) = routing::first_link_url(&item) else {
            tracing::debug!("item has no links to open");
            return;
        };
        let result = dom::window().and_then(|w| {
            w.open_with_url_and_target_and_features(&url, "_blank", "noopener,noreferrer")
                .map_err(dom::js_err)
        });
        if let Err(e) = result {
            tracing::warn!(url = %url, error = %e, "failed to open link");
        }
    }

    fn resync_scrollbar(&self) {
        if let Some(scrollbar) = &self.scrollbar {
            scrollbar.schedule_sync();
        }
    }
}

fn report(component: &str, result: Result<(), LyricbookError>) {
    if let Err(e) = result {
        tracing::error!(component, error = %e, "failed to wire component");
    }
}
