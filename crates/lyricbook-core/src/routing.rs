//! Maps raw page events to modal actions.
//!
//! Clicks are delegated at the document level, so the web layer describes
//! where a click landed and this module decides what it means.

use crate::config::{BehaviorConfig, OpenMode};
use crate::item::Item;
use crate::links;

/// Where a click landed, relative to the item list.
#[derive(Debug, Clone, Default)]
pub struct ClickContext<'a> {
    /// The target is inside a modal close control.
    pub on_close_control: bool,
    /// The target is inside an item.
    pub inside_item: bool,
    /// The target is inside the item's open affordance.
    pub on_open_affordance: bool,
    /// The target is inside a link or button.
    pub on_interactive: bool,
    /// Page mode read from the document body.
    pub page_mode: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickIntent {
    CloseModal,
    OpenModal,
    /// Skip the modal and open the item's first link in a new context.
    OpenFirstLink,
    Ignore,
}

/// Decide what a click means. Close controls win over item routing, even when
/// the control sits inside an item.
pub fn route_click(ctx: &ClickContext<'_>, behavior: &BehaviorConfig) -> ClickIntent {
    if ctx.on_close_control {
        return ClickIntent::CloseModal;
    }
    if !ctx.inside_item {
        return ClickIntent::Ignore;
    }

    match behavior.open_mode {
        OpenMode::Affordance if ctx.on_open_affordance => ClickIntent::OpenModal,
        OpenMode::Affordance => ClickIntent::Ignore,
        OpenMode::Card if ctx.on_interactive => ClickIntent::Ignore,
        OpenMode::Card if ctx.page_mode == Some(behavior.exception_page_mode.as_str()) => {
            ClickIntent::OpenFirstLink
        }
        OpenMode::Card => ClickIntent::OpenModal,
    }
}

/// URL of the item's first usable link, if any.
pub fn first_link_url(item: &Item) -> Option<String> {
    links::parse_links(item.links_raw.as_deref())
        .into_iter()
        .next()
        .map(|l| l.url)
}

/// Page-level keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Escape: dismiss the modal.
    CloseModal,
}

/// Map a `KeyboardEvent.key` value to a shortcut.
pub fn map_key(key: &str) -> Option<Shortcut> {
    match key {
        "Escape" | "Esc" => Some(Shortcut::CloseModal),
        _ => None,
    }
}
