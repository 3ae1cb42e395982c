use crate::config::TextConfig;
use crate::item::Item;
use crate::links::{self, LinkRecord};
use crate::routing::{self, Shortcut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// What the links region should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinksPanel {
    Links(Vec<LinkRecord>),
    /// Static placeholder message.
    Empty(String),
}

/// Everything written into the modal synchronously on open.
///
/// Body and description start as the loading string and are replaced once
/// the detail loader resolves them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub subtitle: String,
    pub body_placeholder: String,
    pub description_placeholder: String,
    /// `Some(url)` reveals the video link, `None` hides it.
    pub video_url: Option<String>,
    pub links: LinksPanel,
}

impl ModalContent {
    pub fn for_item(item: &Item, text: &TextConfig) -> Self {
        let records = links::parse_links(item.links_raw.as_deref());
        let links = if records.is_empty() {
            LinksPanel::Empty(text.no_links.clone())
        } else {
            LinksPanel::Links(records)
        };

        Self {
            title: item.display_title(text).to_string(),
            subtitle: item.subtitle(text),
            body_placeholder: text.loading.clone(),
            description_placeholder: text.loading.clone(),
            video_url: item.video_url.clone(),
            links,
        }
    }
}

/// DOM changes the view applies when the modal changes state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalEffects {
    /// Whether the open class is present on the modal root.
    pub active: bool,
    pub aria_hidden: bool,
    /// Whether the page body's own scrolling is suppressed.
    pub lock_body_scroll: bool,
    /// Rewind the modal's scroll region to the top.
    pub reset_scroll: bool,
}

impl ModalEffects {
    pub fn for_state(state: ModalState) -> Self {
        match state {
            ModalState::Open => Self {
                active: true,
                aria_hidden: false,
                lock_body_scroll: true,
                reset_scroll: true,
            },
            ModalState::Closed => Self {
                active: false,
                aria_hidden: true,
                lock_body_scroll: false,
                reset_scroll: false,
            },
        }
    }
}

/// Open/closed state of the single detail overlay.
#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
}

impl ModalController {
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Bind `item` and open. Opening while already open rebinds without closing.
    pub fn open(&mut self, item: &Item, text: &TextConfig) -> (ModalContent, ModalEffects) {
        let content = ModalContent::for_item(item, text);
        tracing::debug!(
            title = %content.title,
            rebind = self.state == ModalState::Open,
            "opening modal"
        );
        self.state = ModalState::Open;
        (content, ModalEffects::for_state(self.state))
    }

    /// Close the modal. `None` when it was already closed and nothing changes.
    pub fn close(&mut self) -> Option<ModalEffects> {
        match self.state {
            ModalState::Open => {
                self.state = ModalState::Closed;
                Some(ModalEffects::for_state(self.state))
            }
            ModalState::Closed => None,
        }
    }

    /// Handle a page-level key press. Escape closes an open modal.
    pub fn handle_key(&mut self, key: &str) -> Option<ModalEffects> {
        match routing::map_key(key)? {
            Shortcut::CloseModal => self.close(),
        }
    }
}
