//! Turns a parsed outline into graph-script statements.
//!
//! ```text
//! metallica = g.band 'Metallica'
//! megadeth  = g.band 'Megadeth'
//!
//! mustaine_d = g.person 'Dave Mustaine'
//!
//! metallica.member mustaine_d
//! mustaine_d.edge megadeth, 'label="lead"'
//! ```

use std::collections::{HashMap, HashSet};

use crate::display_width::{column_width, pad_to};
use crate::dot;
use crate::graph::{Membership, NodeKind};
use crate::ident::{group_key, person_key};
use crate::outline::{Attachment, Connection, Outline};

/// Script binding names for outline keys.
///
/// Every declaration gets its own name even when keys collide, so a group and a
/// person sharing a key stay apart. A key resolves to the name declared last for
/// it, the same node `Outline::to_graph` picks.
#[derive(Default)]
struct Bindings {
    used: HashSet<String>,
    by_key: HashMap<(NodeKind, String), String>,
}

impl Bindings {
    fn bind(&mut self, kind: NodeKind, key: String) -> String {
        let base = match (key.is_empty(), kind) {
            (false, _) => key.clone(),
            (true, NodeKind::Group) => "band".to_string(),
            (true, NodeKind::Person) => "person".to_string(),
        };
        let mut name = base.clone();
        let mut n = 2;
        while self.used.contains(&name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        self.used.insert(name.clone());
        self.by_key.insert((kind, key), name.clone());
        name
    }

    fn name<'a>(&'a self, kind: NodeKind, key: &'a str) -> &'a str {
        self.by_key
            .get(&(kind, key.to_string()))
            .map_or(key, String::as_str)
    }
}

pub fn format_script(outline: &Outline) -> String {
    let mut bindings = Bindings::default();
    let groups: Vec<(String, &str)> = outline
        .groups
        .iter()
        .map(|name| (bindings.bind(NodeKind::Group, group_key(name)), name.as_str()))
        .collect();
    let persons: Vec<(String, &str)> = outline
        .persons
        .iter()
        .map(|name| (bindings.bind(NodeKind::Person, person_key(name)), name.as_str()))
        .collect();

    let blocks = [
        declarations(&groups, "band"),
        declarations(&persons, "person"),
        outline
            .connections
            .iter()
            .map(|conn| connection_statement(conn, &bindings))
            .collect(),
    ];

    let mut out = String::new();
    for block in blocks.into_iter().filter(|b| !b.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        for line in block {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn declarations(entries: &[(String, &str)], constructor: &str) -> Vec<String> {
    let width = column_width(entries.iter().map(|(key, _)| key.as_str()));
    entries
        .iter()
        .map(|(key, name)| format!("{} = g.{constructor} {}", pad_to(key, width), quote(name)))
        .collect()
}

fn connection_statement(conn: &Connection, bindings: &Bindings) -> String {
    let source = bindings.name(conn.source_kind, &conn.source);
    let target = bindings.name(NodeKind::Group, &conn.target);
    match conn.attachment() {
        Attachment::Membership(Membership::Member) => format!("{target}.member {source}"),
        Attachment::Membership(Membership::Guest) => format!("{target}.guest {source}"),
        Attachment::Labeled(label) => {
            let style = format!("label={}", dot::quote(label));
            format!("{source}.edge {target}, {}", quote(&style))
        }
    }
}

/// Single-quoted literal; `\` and `'` are backslash-escaped.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\\' || ch == '\'' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}
