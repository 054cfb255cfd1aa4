//! The capabilities the navigator needs from the document it runs in.
//!
//! Split by concern so a host that only supports querying can still be
//! scanned and classified. [`NavigationHost`] is the full set.

use anyhow::Error;
use core::fmt::Debug;
use css_selectors::SelectorList;
use html::{Document, NodeId, ScrollIntoViewOptions};

/// Element lookup and selector matching.
pub trait ElementQuery {
    /// An opaque, comparable handle to a live element.
    type Element: Copy + Eq + Debug;

    /// Every element matching any selector in `list`, in document order.
    fn query_all(&self, list: &SelectorList) -> Vec<Self::Element>;

    /// Whether `element` matches any selector in `list`.
    fn matches_any(&self, element: Self::Element, list: &SelectorList) -> bool;

    /// Lowercase tag name, or `None` if the element is gone.
    fn element_tag(&self, element: Self::Element) -> Option<&str>;

    /// Label used in log lines.
    fn describe_element(&self, element: Self::Element) -> String {
        format!("{element:?}")
    }
}

/// Read and write access to inline style properties.
pub trait StyleAccess: ElementQuery {
    /// Current inline value of `property`; empty when unset.
    fn read_style(&self, element: Self::Element, property: &str) -> Result<String, Error>;

    /// Set an inline property. An empty value clears the declaration.
    fn write_style(
        &mut self,
        element: Self::Element,
        property: &str,
        value: &str,
    ) -> Result<(), Error>;
}

pub trait ViewScroller: ElementQuery {
    fn bring_into_view(
        &mut self,
        element: Self::Element,
        options: ScrollIntoViewOptions,
    ) -> Result<(), Error>;
}

/// Everything a [`crate::Navigator`] drives.
pub trait NavigationHost: StyleAccess + ViewScroller {}

impl<T: StyleAccess + ViewScroller> NavigationHost for T {}

impl ElementQuery for Document {
    type Element = NodeId;

    fn query_all(&self, list: &SelectorList) -> Vec<NodeId> {
        self.query_selector_all(list)
    }

    fn matches_any(&self, element: NodeId, list: &SelectorList) -> bool {
        self.matches(element, list)
    }

    fn element_tag(&self, element: NodeId) -> Option<&str> {
        self.local_name(element)
    }

    fn describe_element(&self, element: NodeId) -> String {
        self.describe(element)
    }
}

impl StyleAccess for Document {
    fn read_style(&self, element: NodeId, property: &str) -> Result<String, Error> {
        self.style_property(element, property).map(str::to_owned)
    }

    fn write_style(&mut self, element: NodeId, property: &str, value: &str) -> Result<(), Error> {
        self.set_style_property(element, property, value)
    }
}

impl ViewScroller for Document {
    fn bring_into_view(
        &mut self,
        element: NodeId,
        options: ScrollIntoViewOptions,
    ) -> Result<(), Error> {
        self.scroll_into_view(element, options)
    }
}
