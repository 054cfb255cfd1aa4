//! HTML document model for page navigation.
//!
//! Markup is parsed with html5ever and converted into an arena-backed tree
//! ([`dom::Document`]). The tree answers selector queries in document order,
//! keeps each element's inline style declarations editable, and records
//! scroll-into-view requests made against it.

#![allow(
    clippy::missing_errors_doc,
    reason = "Errors are uniformly 'node is not a live element'"
)]

pub mod dom;
pub mod parser;

pub use dom::scroll::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollRequest};
pub use dom::style::InlineStyle;
pub use dom::{DOMNode, Document, NodeKind};
pub use indextree::NodeId;
pub use parser::parse_html;
