use std::fmt::Write;

use crate::types::{Entry, Node};

const RESERVED_WORDS: &[&str] = &["true", "false", "null", "inf", "nan"];

pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');

    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() || needs_unicode_escape(c) => {
                let _ = write!(result, "\\u{{{:x}}}", c as u32);
            }
            c => result.push(c),
        }
    }

    result.push('"');
    result
}

/// Characters KDL reads as newlines or forbids in document text.
fn needs_unicode_escape(c: char) -> bool {
    matches!(
        c,
        '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{200e}' | '\u{200f}' | '\u{202a}'..='\u{202e}' | '\u{2066}'..='\u{2069}'
    )
}

pub fn is_valid_identifier(s: &str) -> bool {
    if s.is_empty() || RESERVED_WORDS.contains(&s) {
        return false;
    }

    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

pub fn render_key(key: &str) -> String {
    if is_valid_identifier(key) {
        key.to_string()
    } else {
        escape_string(key)
    }
}

pub fn write_indent<W: std::fmt::Write>(w: &mut W, indent: usize) -> std::fmt::Result {
    for _ in 0..indent {
        w.write_str("    ")?;
    }
    Ok(())
}

/// Render the entries of `node` as a KDL document.
///
/// Values are always written as strings so text survives a round trip
/// unchanged. Empty fragments are written as bare node names.
pub fn render_document(node: &Node) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_entries(&mut out, node, 0);
    out
}

/// Render `node` itself (name included) as a single KDL node.
pub fn render_node(node: &Node) -> String {
    let mut out = String::new();
    let _ = render_child(&mut out, node, 0);
    out
}

fn render_entries<W: std::fmt::Write>(w: &mut W, node: &Node, indent: usize) -> std::fmt::Result {
    for entry in node.entries() {
        match entry {
            Entry::Value { name, text } => {
                write_indent(w, indent)?;
                writeln!(w, "{} {}", render_key(name), escape_string(text))?;
            }
            Entry::Child(child) => render_child(w, child, indent)?,
        }
    }
    Ok(())
}

fn render_child<W: std::fmt::Write>(w: &mut W, node: &Node, indent: usize) -> std::fmt::Result {
    write_indent(w, indent)?;
    w.write_str(&render_key(&node.name))?;
    if node.is_empty() {
        return w.write_char('\n');
    }
    w.write_str(" {\n")?;
    render_entries(w, node, indent + 1)?;
    write_indent(w, indent)?;
    w.write_str("}\n")
}
