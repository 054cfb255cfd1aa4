pub mod printing;
pub mod scroll;
pub mod style;

use crate::dom::scroll::{ScrollIntoViewOptions, ScrollRequest};
use crate::dom::style::InlineStyle;
use anyhow::{Error, anyhow};
use css_selectors::{ElementAdapter, SelectorList, matches_selector_list};
use indextree::{Arena, NodeId};
use log::{debug, trace};
use smallvec::SmallVec;

#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element {
        tag: String,
    },
    Text {
        text: String,
    },
    Comment {
        text: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DOMNode {
    pub kind: NodeKind,
    pub attrs: SmallVec<(String, String), 4>,
    /// Parsed form of the `style` attribute. Kept in sync with `attrs`.
    pub style: InlineStyle,
}

impl DOMNode {
    fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
            },
            ..Self::default()
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn write_attr(&mut self, name: &str, value: String) {
        if let Some(slot) = self
            .attrs
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            slot.1 = value;
        } else {
            self.attrs.push((name.to_ascii_lowercase(), value));
        }
    }

    fn drop_attr(&mut self, name: &str) {
        self.attrs.retain(|entry| !entry.0.eq_ignore_ascii_case(name));
    }

    /// Mirror the parsed inline style back into the `style` attribute.
    fn sync_style_attr(&mut self) {
        if self.style.is_empty() {
            self.drop_attr("style");
        } else {
            let css_text = self.style.to_css_text();
            self.write_attr("style", css_text);
        }
    }
}

/// An HTML document: an arena of nodes rooted at a `#document` node.
///
/// Node handles are `indextree::NodeId`s. A handle to a removed node stays
/// comparable but no longer resolves, and is never handed out again for a
/// different node.
pub struct Document {
    dom: Arena<DOMNode>,
    root: NodeId,
    scrolls: Vec<ScrollRequest>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut dom = Arena::new();
        Self {
            root: dom.new_node(DOMNode::default()),
            dom,
            scrolls: Vec::new(),
        }
    }

    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Borrow a node that is still present in the arena.
    pub fn node(&self, id: NodeId) -> Option<&DOMNode> {
        self.dom.get(id).map(|node| node.get())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut DOMNode> {
        self.dom.get_mut(id).map(|node| node.get_mut())
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut DOMNode, Error> {
        match self.node_mut(id) {
            Some(node) if node.tag().is_some() => Ok(node),
            Some(_) => Err(anyhow!("node {id} is not an element")),
            None => Err(anyhow!("node {id} is no longer in the document")),
        }
    }

    fn element(&self, id: NodeId) -> Result<&DOMNode, Error> {
        match self.node(id) {
            Some(node) if node.tag().is_some() => Ok(node),
            Some(_) => Err(anyhow!("node {id} is not an element")),
            None => Err(anyhow!("node {id} is no longer in the document")),
        }
    }

    /// Create a detached element. Attach it with [`Document::append_child`].
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.dom.new_node(DOMNode::element(tag))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Text {
                text: text.to_owned(),
            },
            ..DOMNode::default()
        })
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.dom.new_node(DOMNode {
            kind: NodeKind::Comment {
                text: text.to_owned(),
            },
            ..DOMNode::default()
        })
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        parent
            .checked_append(child, &mut self.dom)
            .map_err(|err| anyhow!("cannot append {child} to {parent}: {err}"))
    }

    /// Remove a node and its whole subtree from the document.
    pub fn remove(&mut self, id: NodeId) -> Result<(), Error> {
        if id == self.root {
            return Err(anyhow!("the document node cannot be removed"));
        }
        if self.dom.get(id).is_none() {
            return Err(anyhow!("node {id} is no longer in the document"));
        }
        debug!(target: "html", "removing subtree rooted at {id}");
        id.remove_subtree(&mut self.dom);
        Ok(())
    }

    /// True if the node still exists and is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.dom.get(id).is_some() && id.ancestors(&self.dom).last() == Some(self.root)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), Error> {
        let node = self.element_mut(id)?;
        if name.eq_ignore_ascii_case("style") {
            node.style = InlineStyle::parse(value);
        }
        node.write_attr(name, value.to_owned());
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), Error> {
        let node = self.element_mut(id)?;
        if name.eq_ignore_ascii_case("style") {
            node.style = InlineStyle::default();
        }
        node.drop_attr(name);
        Ok(())
    }

    /// Lowercase tag name of an element node.
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(DOMNode::tag)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).and_then(|node| node.attr(name))
    }

    /// All element nodes in document (pre-order) order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root
            .descendants(&self.dom)
            .filter(|id| self.local_name(*id).is_some())
    }

    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.elements()
            .find(|id| self.attribute(*id, "id") == Some(element_id))
    }

    /// Every connected element matching any selector of `list`, in document order.
    pub fn query_selector_all(&self, list: &SelectorList) -> Vec<NodeId> {
        let found: Vec<NodeId> = self
            .elements()
            .filter(|id| matches_selector_list(self, *id, list))
            .collect();
        trace!(target: "html", "query matched {} element(s)", found.len());
        found
    }

    pub fn matches(&self, id: NodeId, list: &SelectorList) -> bool {
        self.local_name(id).is_some() && matches_selector_list(self, id, list)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        if self.dom.get(id).is_none() {
            return String::new();
        }
        id.descendants(&self.dom)
            .filter_map(|desc| match self.node(desc).map(|node| &node.kind) {
                Some(NodeKind::Text { text }) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Inline value of a CSS property, or the empty string when unset.
    pub fn style_property(&self, id: NodeId, property: &str) -> Result<&str, Error> {
        Ok(self.element(id)?.style.get(property))
    }

    /// Set an inline CSS property. An empty value removes the declaration.
    pub fn set_style_property(
        &mut self,
        id: NodeId,
        property: &str,
        value: &str,
    ) -> Result<(), Error> {
        let node = self.element_mut(id)?;
        node.style.set(property, value);
        node.sync_style_attr();
        Ok(())
    }

    /// Record a request to bring the element into view. Layout and painting
    /// live outside this crate, so the request is only logged for them.
    pub fn scroll_into_view(
        &mut self,
        id: NodeId,
        options: ScrollIntoViewOptions,
    ) -> Result<(), Error> {
        if !self.is_connected(id) {
            return Err(anyhow!("cannot scroll to disconnected node {id}"));
        }
        debug!(target: "html", "scroll into view requested for {id}: {options:?}");
        self.scrolls.push(ScrollRequest {
            target: id,
            options,
        });
        Ok(())
    }

    /// Scroll requests in the order they were made.
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scrolls
    }
}

impl ElementAdapter for Document {
    type Handle = NodeId;

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        element
            .ancestors(&self.dom)
            .nth(1)
            .filter(|parent| self.local_name(*parent).is_some())
    }

    fn previous_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        element
            .preceding_siblings(&self.dom)
            .skip(1)
            .find(|sibling| self.local_name(*sibling).is_some())
    }

    fn tag_name(&self, element: NodeId) -> &str {
        self.node(element)
            .and_then(DOMNode::tag)
            .unwrap_or_default()
    }

    fn attr(&self, element: NodeId, name: &str) -> Option<&str> {
        self.attribute(element, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_selectors::parse_selector_list;

    fn sample() -> Result<(Document, NodeId, NodeId), Error> {
        let mut doc = Document::new();
        let body = doc.create_element("BODY");
        doc.append_child(doc.root(), body)?;
        let heading = doc.create_element("h1");
        doc.append_child(body, heading)?;
        let text = doc.create_text("Title");
        doc.append_child(heading, text)?;
        Ok((doc, body, heading))
    }

    #[test]
    fn style_attribute_round_trips_through_inline_style() -> Result<(), Error> {
        let (mut doc, _, heading) = sample()?;
        doc.set_attribute(heading, "style", "color: red; OUTLINE: none")?;
        assert_eq!(doc.style_property(heading, "outline")?, "none");
        doc.set_style_property(heading, "color", "")?;
        assert_eq!(doc.attribute(heading, "style"), Some("outline: none"));
        doc.set_style_property(heading, "outline", "")?;
        assert_eq!(doc.attribute(heading, "style"), None);
        Ok(())
    }

    #[test]
    fn removed_nodes_stop_resolving() -> Result<(), Error> {
        let (mut doc, body, heading) = sample()?;
        assert!(doc.is_connected(heading));
        doc.remove(body)?;
        assert!(!doc.is_connected(heading));
        assert!(doc.style_property(heading, "color").is_err());
        assert!(doc.remove(heading).is_err());
        assert_eq!(doc.elements().count(), 0);
        Ok(())
    }

    #[test]
    fn adapter_parent_skips_document_node() -> Result<(), Error> {
        let (doc, body, heading) = sample()?;
        assert_eq!(ElementAdapter::parent(&doc, heading), Some(body));
        assert_eq!(ElementAdapter::parent(&doc, body), None);
        let list = parse_selector_list("body > h1");
        assert_eq!(doc.query_selector_all(&list), vec![heading]);
        assert_eq!(doc.text_content(body), "Title");
        Ok(())
    }
}
