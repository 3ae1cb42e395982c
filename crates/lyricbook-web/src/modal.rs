use lyricbook_core::config::{ClassConfig, UiConfig};
use lyricbook_core::modal::{LinksPanel, ModalContent, ModalEffects};
use web_sys::{Document, Element, HtmlElement};

use crate::dom;

/// The modal's DOM regions. Only the root is required.
pub struct ModalView {
    root: Element,
    title: Option<Element>,
    subtitle: Option<Element>,
    body: Option<Element>,
    description: Option<Element>,
    links: Option<Element>,
    video: Option<HtmlElement>,
    scroll: Option<Element>,
}

impl ModalView {
    pub fn attach(doc: &Document, config: &UiConfig) -> Option<Self> {
        let s = &config.selectors;
        let root = dom::query(doc, &s.modal)?;
        Some(Self {
            title: dom::query(doc, &s.modal_title),
            subtitle: dom::query(doc, &s.modal_sub),
            body: dom::query(doc, &s.modal_body),
            description: dom::query(doc, &s.modal_desc),
            links: dom::query(doc, &s.modal_links),
            video: dom::query_html(doc, &s.modal_youtube),
            scroll: dom::query(doc, &s.modal_scroll),
            root,
        })
    }

    /// Write the synchronous part of an open: headings, placeholders, links.
    pub fn render(&self, doc: &Document, content: &ModalContent, classes: &ClassConfig) {
        set_text(&self.title, &content.title);
        set_text(&self.subtitle, &content.subtitle);
        set_text(&self.body, &content.body_placeholder);
        set_text(&self.description, &content.description_placeholder);

        if let Some(video) = &self.video {
            match &content.video_url {
                Some(url) => {
                    if let Err(e) = video.set_attribute("href", url) {
                        tracing::debug!(error = %dom::js_err(e), "failed to set video link");
                    }
                    video.set_hidden(false);
                }
                None => video.set_hidden(true),
            }
        }

        if let Some(container) = &self.links {
            if let Err(e) = render_links(doc, container, &content.links, classes) {
                tracing::warn!(error = %e, "failed to render links");
            }
        }
    }

    pub fn set_body(&self, text: &str) {
        set_text(&self.body, text);
    }

    pub fn set_description(&self, text: &str) {
        set_text(&self.description, text);
    }

    /// Apply the open or closed state to the DOM.
    pub fn apply(&self, doc: &Document, effects: ModalEffects, classes: &ClassConfig) {
        if let Err(e) = self
            .root
            .class_list()
            .toggle_with_force(&classes.modal_open, effects.active)
        {
            tracing::debug!(error = %dom::js_err(e), "failed to toggle open class");
        }
        set_aria_hidden(&self.root, effects.aria_hidden);
        dom::lock_body_scroll(doc, effects.lock_body_scroll);
        if effects.reset_scroll {
            scroll_region(self.scroll.as_ref(), &self.root).set_scroll_top(0);
        }
    }
}

/// The dedicated scroll region, or the modal root when it scrolls itself.
fn scroll_region<'a, T>(inner: Option<&'a T>, root: &'a T) -> &'a T {
    inner.unwrap_or(root)
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

fn set_aria_hidden(el: &Element, hidden: bool) {
    let value = if hidden { "true" } else { "false" };
    if let Err(e) = el.set_attribute("aria-hidden", value) {
        tracing::debug!(error = %dom::js_err(e), "failed to set aria-hidden");
    }
}

fn render_links(
    doc: &Document,
    container: &Element,
    panel: &LinksPanel,
    classes: &ClassConfig,
) -> Result<(), lyricbook_core::LyricbookError> {
    container.set_text_content(None);

    match panel {
        LinksPanel::Links(records) => {
            for record in records {
                let a = doc.create_element("a").map_err(dom::js_err)?;
                a.set_class_name(&classes.link);
                a.set_attribute("href", &record.url).map_err(dom::js_err)?;
                a.set_attribute("target", "_blank").map_err(dom::js_err)?;
                a.set_attribute("rel", "noopener noreferrer").map_err(dom::js_err)?;
                a.set_text_content(Some(record.display_label()));
                container.append_child(&a).map_err(dom::js_err)?;
            }
        }
        LinksPanel::Empty(message) => {
            let p = doc.create_element("p").map_err(dom::js_err)?;
            p.set_class_name(&classes.no_links);
            p.set_text_content(Some(message));
            container.append_child(&p).map_err(dom::js_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_region_prefers_inner() {
        assert_eq!(*scroll_region(Some(&"inner"), &"root"), "inner");
    }

    #[test]
    fn scroll_region_falls_back_to_root() {
        assert_eq!(*scroll_region(None, &"root"), "root");
    }
}
