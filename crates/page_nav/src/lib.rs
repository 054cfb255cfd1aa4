//! Keyboard navigation for documents.
//!
//! `h`, `l` and `m` move to the next heading, link or landmark region;
//! the up and down arrows choose the direction. The element landed on is
//! highlighted with inline styles, which are restored exactly when the
//! highlight moves on.
//!
//! The document is reached through the traits in [`host`]; an
//! implementation for [`html::Document`] is provided.

#![allow(clippy::missing_errors_doc, reason = "errors are host failures passed through")]

pub mod catalog;
pub mod highlight;
pub mod host;
pub mod input;
pub mod navigator;
pub mod scanner;
pub mod traversal;

pub use catalog::{Category, SelectorCatalog};
pub use highlight::{HIGHLIGHT_STYLE, HighlightStyle, Highlighter, SCROLL_OPTIONS, SavedStyle};
pub use host::{ElementQuery, NavigationHost, StyleAccess, ViewScroller};
pub use input::{KeyAction, KeyEvent, TEXT_ENTRY_TAGS, decode_key, is_text_entry_tag};
pub use navigator::{IgnoreReason, KeyListener, NavOutcome, Navigator};
pub use scanner::{ScannedNode, scan};
pub use traversal::{Direction, TraversalHit, find_next, find_node, find_prev};
