use kdl::{KdlDocument, KdlNode, KdlValue};

use crate::error::DocumentError;
use crate::types::Node;

/// Parse KDL text into an unnamed root [`Node`] holding the top-level entries.
pub fn parse_document(contents: &str) -> Result<Node, DocumentError> {
    let document: KdlDocument = contents.parse().map_err(|e: kdl::KdlError| DocumentError {
        message: e.to_string(),
    })?;

    let mut root = Node::new();
    append_nodes(&mut root, &document);
    log::trace!("parsed KDL document with {} top-level entries", root.entries().len());
    Ok(root)
}

fn append_nodes(parent: &mut Node, document: &KdlDocument) {
    for node in document.nodes() {
        append_kdl_node(parent, node);
    }
}

fn append_kdl_node(parent: &mut Node, node: &KdlNode) {
    let name = node.name().value();

    for entry in node.entries() {
        if let Some(key) = entry.name() {
            log::debug!("ignoring property `{}` on `{name}`", key.value());
        }
    }

    if let Some(children) = node.children() {
        let child = parent.push_child(name);
        append_nodes(child, children);
        return;
    }

    let mut has_args = false;
    for entry in node.entries().iter().filter(|entry| entry.name().is_none()) {
        has_args = true;
        parent.push_value(name, value_text(entry.value()));
    }

    if !has_args {
        parent.push_child(name);
    }
}

fn value_text(value: &KdlValue) -> String {
    match value {
        KdlValue::String(s) => s.to_string(),
        KdlValue::Integer(i) => i.to_string(),
        KdlValue::Float(f) => f.to_string(),
        KdlValue::Bool(b) => b.to_string(),
        KdlValue::Null => String::new(),
    }
}
