use std::collections::HashMap;

use crate::error::Error;
use crate::graph::{Graph, GroupRef, Membership, NodeKind, NodeRef};
use crate::ident::{group_key, person_key};
use crate::ordered_set::OrderedSet;

/// Parsed outline: unique names in first-seen order plus every attachment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outline {
    pub groups: OrderedSet<String>,
    pub persons: OrderedSet<String>,
    pub connections: Vec<Connection>,
}

/// An attachment of `source` to the group `target`, both given as keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub source: String,
    pub source_kind: NodeKind,
    pub target: String,
    pub label: Option<String>,
}

/// Edge form a connection label turns into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attachment<'a> {
    Membership(Membership),
    Labeled(&'a str),
}

impl Connection {
    pub fn attachment(&self) -> Attachment<'_> {
        match self.label.as_deref() {
            None | Some("member") => Attachment::Membership(Membership::Member),
            Some("guest") => Attachment::Membership(Membership::Guest),
            Some(label) => Attachment::Labeled(label),
        }
    }
}

impl Outline {
    /// Builds the graph: groups first, then persons, then one edge per connection.
    ///
    /// Keys that collide resolve to the node created last.
    pub fn to_graph(&self) -> Result<Graph, Error> {
        let mut graph = Graph::new();
        let mut groups: HashMap<String, GroupRef> = HashMap::new();
        let mut persons: HashMap<String, NodeRef> = HashMap::new();

        for name in &self.groups {
            groups.insert(group_key(name), graph.add_group(name));
        }
        for name in &self.persons {
            persons.insert(person_key(name), graph.add_person(name));
        }

        for conn in &self.connections {
            let target = *groups
                .get(&conn.target)
                .ok_or_else(|| Error::UnresolvedKey(conn.target.clone()))?;
            let source = match conn.source_kind {
                NodeKind::Group => groups.get(&conn.source).map(|g| g.node()),
                NodeKind::Person => persons.get(&conn.source).copied(),
            }
            .ok_or_else(|| Error::UnresolvedKey(conn.source.clone()))?;

            match conn.attachment() {
                Attachment::Membership(membership) => graph.connect(target, source, membership),
                Attachment::Labeled(label) => graph.labeled_edge(source, target, label, ""),
            }
        }

        tracing::debug!(
            nodes = graph.nodes().len(),
            edges = graph.edges().len(),
            "built graph from outline"
        );
        Ok(graph)
    }
}
