use core::fmt;

use super::{DOMNode, Document, NodeKind};
use indextree::NodeId;

use serde_json::{Map, Value, json};

// -----------------------
// Module-scope helpers
// -----------------------

fn flush_text(children: &mut Vec<Value>, text_buf: &mut String) {
    if !text_buf.trim().is_empty() {
        children.push(json!({ "type": "text", "text": text_buf.clone() }));
    }
    text_buf.clear();
}

fn push_non_null(children: &mut Vec<Value>, value: Value) {
    if !value.is_null() {
        children.push(value);
    }
}

fn sorted_attrs(node: &DOMNode) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = node
        .attrs
        .iter()
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();
    pairs.sort_by(|left, right| left.0.cmp(right.0));
    pairs
}

fn coalesce_children(doc: &Document, id: NodeId) -> Vec<Value> {
    let mut children: Vec<Value> = Vec::new();
    let mut text_buf = String::new();
    for child in id.children(&doc.dom) {
        if let Some(NodeKind::Text { text }) = doc.node(child).map(|node| &node.kind) {
            text_buf.push_str(text);
            continue;
        }
        flush_text(&mut children, &mut text_buf);
        push_non_null(&mut children, node_to_json(doc, child));
    }
    flush_text(&mut children, &mut text_buf);
    children
}

fn node_to_json(doc: &Document, id: NodeId) -> Value {
    let Some(node) = doc.node(id) else {
        return Value::Null;
    };
    match &node.kind {
        NodeKind::Document => json!({ "type": "document", "children": coalesce_children(doc, id) }),
        NodeKind::Element { tag } => {
            let mut attrs_obj = Map::new();
            for (key, value) in sorted_attrs(node) {
                attrs_obj.insert(key.to_owned(), Value::String(value.to_owned()));
            }
            json!({
                "type": "element",
                "tag": tag,
                "attrs": Value::Object(attrs_obj),
                "children": coalesce_children(doc, id),
            })
        }
        NodeKind::Text { text } => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                json!({ "type": "text", "text": text })
            }
        }
        NodeKind::Comment { .. } => Value::Null,
    }
}

fn write_indent(fmt: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        fmt.write_str("  ")?;
    }
    Ok(())
}

fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

fn fmt_node(doc: &Document, id: NodeId, fmt: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    let Some(node) = doc.node(id) else {
        return Ok(());
    };
    match &node.kind {
        NodeKind::Document => {
            write_indent(fmt, depth)?;
            writeln!(fmt, "#document")?;
            fmt_children(doc, id, fmt, depth)?;
        }
        NodeKind::Element { tag } => {
            write_indent(fmt, depth)?;
            write!(fmt, "<{tag}")?;
            for (key, value) in sorted_attrs(node) {
                write!(fmt, " {key}=\"{}\"", escape_text(value))?;
            }
            writeln!(fmt, ">")?;
            fmt_children(doc, id, fmt, depth)?;
            write_indent(fmt, depth)?;
            writeln!(fmt, "</{tag}>")?;
        }
        NodeKind::Text { text } => {
            // Skip pure-whitespace text nodes in the printer for cleaner output
            if text.chars().all(char::is_whitespace) {
                return Ok(());
            }
            write_indent(fmt, depth)?;
            writeln!(fmt, "\"{}\"", escape_text(text))?;
        }
        NodeKind::Comment { text } => {
            write_indent(fmt, depth)?;
            writeln!(fmt, "<!--{text}-->")?;
        }
    }
    Ok(())
}

fn fmt_children(
    doc: &Document,
    id: NodeId,
    fmt: &mut fmt::Formatter<'_>,
    depth: usize,
) -> fmt::Result {
    for child in id.children(&doc.dom) {
        fmt_node(doc, child, fmt, depth + 1)?;
    }
    Ok(())
}

impl fmt::Debug for Document {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(fmt, "DOM")?;
        fmt_node(self, self.root, fmt, 0)
    }
}

impl Document {
    /// Build a deterministic JSON representation of the DOM.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "div", "attrs": {..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root)
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_else(|_| String::from("{}"))
    }

    /// Short human-readable label for an element: tag, id and a text excerpt.
    pub fn describe(&self, id: NodeId) -> String {
        let Some(tag) = self.local_name(id) else {
            return format!("#{id}");
        };
        let mut label = format!("<{tag}");
        if let Some(element_id) = self.attribute(id, "id") {
            label.push_str(&format!(" id=\"{}\"", escape_text(element_id)));
        }
        if let Some(role) = self.attribute(id, "role") {
            label.push_str(&format!(" role=\"{}\"", escape_text(role)));
        }
        label.push('>');
        let text = self.text_content(id);
        let collapsed: Vec<&str> = text.split_whitespace().collect();
        if !collapsed.is_empty() {
            let mut excerpt: String = collapsed.join(" ");
            if excerpt.chars().count() > 40 {
                excerpt = excerpt.chars().take(39).collect();
                excerpt.push('…');
            }
            label.push_str(&format!(" \"{}\"", escape_text(&excerpt)));
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_html;

    #[test]
    fn describe_names_tag_id_role_and_text() {
        let doc = parse_html(
            r#"<nav id="menu" role="navigation"><a href="/">A rather long link label that keeps going on</a></nav>"#,
        );
        let nav = doc.get_element_by_id("menu");
        let label = nav.map(|id| doc.describe(id)).unwrap_or_default();
        assert_eq!(
            label,
            r#"<nav id="menu" role="navigation"> "A rather long link label that keeps goi…""#
        );
    }

    #[test]
    fn json_snapshot_sorts_attributes_and_drops_comments() {
        let doc = parse_html(r#"<p title="t" id="x"><!-- note -->Hi</p>"#);
        let json = doc.to_json_value();
        let body = &json["children"][0]["children"][1];
        assert_eq!(body["tag"], "body");
        let para = &body["children"][0];
        let keys: Vec<&String> = para["attrs"]
            .as_object()
            .map(|attrs| attrs.keys().collect())
            .unwrap_or_default();
        assert_eq!(keys, ["id", "title"]);
        assert_eq!(para["children"][0]["text"], "Hi");
    }
}
