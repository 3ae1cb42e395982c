use serde::{Deserialize, Serialize};

use crate::error::LyricbookError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level page configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub selectors: SelectorConfig,
    pub attributes: AttributeConfig,
    pub classes: ClassConfig,
    pub text: TextConfig,
    pub behavior: BehaviorConfig,
    pub logging: LoggingConfig,
}

/// CSS selectors used to locate page elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub search_input: String,
    pub empty: String,
    pub item: String,
    pub open_modal: String,
    pub modal: String,
    pub modal_title: String,
    pub modal_sub: String,
    pub modal_body: String,
    pub modal_desc: String,
    pub modal_links: String,
    pub modal_youtube: String,
    pub modal_close: String,
    pub modal_scroll: String,
    pub scroll_track: String,
    pub scroll_handle: String,
    pub header: String,
    pub scroll_container: String,
    /// Elements inside an item whose clicks never open the modal in card mode.
    pub interactive: String,
}

/// Item attribute names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeConfig {
    pub search: String,
    pub title: String,
    pub genre: String,
    pub date: String,
    pub body: String,
    pub body_src: String,
    pub desc: String,
    pub desc_src: String,
    pub links: String,
    pub youtube: String,
    pub page_mode: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassConfig {
    pub modal_open: String,
    pub header_collapsed: String,
    pub link: String,
    pub no_links: String,
}

/// User-visible literal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    pub untitled: String,
    pub loading: String,
    pub no_lyrics: String,
    pub lyrics_failed: String,
    pub description_fallback: String,
    pub no_links: String,
    pub subtitle_separator: String,
}

/// How clicks on items open the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    /// Only clicks on a designated open affordance inside an item.
    Affordance,
    /// Any click on an item outside links and buttons.
    Card,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorConfig {
    pub open_mode: OpenMode,
    /// Page mode in which card clicks open the item's first link instead of the modal.
    pub exception_page_mode: String,
    pub collapse_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

impl UiConfig {
    /// Built-in defaults with `overrides` merged on top, key by key.
    ///
    /// Tables merge recursively; any other value in `overrides` replaces the default.
    pub fn with_overrides(overrides: &str) -> Result<Self, LyricbookError> {
        let mut base: toml::Table =
            toml::from_str(DEFAULT_CONFIG).map_err(|e| LyricbookError::Config(e.to_string()))?;
        let user: toml::Table =
            toml::from_str(overrides).map_err(|e| LyricbookError::Config(e.to_string()))?;
        merge_tables(&mut base, user);
        toml::Value::Table(base)
            .try_into()
            .map_err(|e: toml::de::Error| LyricbookError::Config(e.to_string()))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
