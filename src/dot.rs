//! Graphviz DOT output.
//!
//! Nodes and edges are written in insertion order; nothing is sorted, so two
//! renders of the same graph are byte-identical.

use crate::config::DotConfig;
use crate::graph::{Edge, Graph, Node};

pub fn render(graph: &Graph, config: &DotConfig) -> String {
    let mut out = String::from("digraph {\n");

    for (key, value) in config.attributes() {
        out.push_str(&format!("  {key}={};\n", attribute_value(&value)));
    }

    for node in graph.nodes() {
        out.push_str(&format!("  {}\n", node_statement(node)));
    }

    for edge in graph.edges() {
        out.push_str(&format!("  {}\n", edge_statement(edge)));
    }

    out.push_str("}\n");
    out
}

fn node_statement(node: &Node) -> String {
    let attrs = join_attributes(&[format!("label={}", quote(&node.label)), node.style.clone()]);
    format!("{} [{attrs}];", node.id)
}

fn edge_statement(edge: &Edge) -> String {
    let label = edge
        .label
        .as_deref()
        .map(|l| format!("label={}", quote(l)))
        .unwrap_or_default();
    let attrs = join_attributes(&[label, edge.style.clone()]);
    format!("{} -> {} [{attrs}];", edge.source, edge.target)
}

fn join_attributes(parts: &[String]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escapes backslashes and double quotes; everything else is kept verbatim.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch == '\\' || ch == '"' {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

pub fn quote(s: &str) -> String {
    format!("\"{}\"", escape(s))
}

/// Bare DOT IDs and numerals are written as-is, anything else is quoted.
fn attribute_value(value: &str) -> String {
    if is_plain_id(value) || is_numeral(value) {
        value.to_string()
    } else {
        quote(value)
    }
}

fn is_plain_id(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_numeral(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || digits == "." {
        return false;
    }
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}
