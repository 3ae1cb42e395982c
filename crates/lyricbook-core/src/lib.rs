//! Page logic for the lyricbook gallery, independent of the browser DOM.
//!
//! The `lyricbook-web` crate binds these pieces to real elements; everything
//! here is plain Rust and tested on the host.

pub mod collapse;
pub mod config;
pub mod error;
pub mod filter;
pub mod item;
pub mod links;
pub mod loader;
pub mod matcher;
pub mod modal;
pub mod routing;
pub mod scrollbar;

pub use config::UiConfig;
pub use error::{FetchError, LyricbookError};
pub use item::{AttributeSource, ContentSource, Item};
