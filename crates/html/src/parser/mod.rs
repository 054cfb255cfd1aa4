//! HTML5 parsing using html5ever.

use crate::dom::Document;
use html5ever::tendril::TendrilSink as _;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use log::{debug, warn};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Parse a complete HTML document into a [`Document`].
///
/// html5ever recovers from every syntax error, so parsing itself cannot fail.
/// Whitespace-only text, doctypes and processing instructions are dropped.
pub fn parse_html(html: &str) -> Document {
    let rc_dom: RcDom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    for error in rc_dom.errors.iter().take(8) {
        debug!(target: "html", "recovered parse error: {error}");
    }
    let mut doc = Document::new();
    let root = doc.root();
    convert_children(&mut doc, &rc_dom.document, root);
    debug!(target: "html", "parsed document with {} element(s)", doc.elements().count());
    doc
}

fn convert_children(doc: &mut Document, rc_node: &Handle, parent: NodeId) {
    for child in rc_node.children.borrow().iter() {
        convert_node(doc, child, parent);
    }
}

/// Convert an html5ever node (and its subtree) and append it under `parent`.
fn convert_node(doc: &mut Document, rc_node: &Handle, parent: NodeId) {
    let node = match &rc_node.data {
        RcNodeData::Document => {
            convert_children(doc, rc_node, parent);
            return;
        }
        RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => return,
        RcNodeData::Text { contents } => {
            let text = contents.borrow();
            if text.trim().is_empty() {
                return;
            }
            doc.create_text(&text)
        }
        RcNodeData::Comment { contents } => doc.create_comment(contents),
        RcNodeData::Element { name, attrs, .. } => {
            let node = doc.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                if let Err(err) = doc.set_attribute(node, &attr.name.local, &attr.value) {
                    warn!(target: "html", "dropping attribute {}: {err}", &*attr.name.local);
                }
            }
            node
        }
    };
    if let Err(err) = doc.append_child(parent, node) {
        warn!(target: "html", "dropping node: {err}");
        return;
    }
    convert_children(doc, rc_node, node);
}
