use std::fmt;

use crate::config::DotConfig;
use crate::dot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Person,
}

impl NodeKind {
    pub fn default_style(self) -> &'static str {
        match self {
            NodeKind::Group => "shape=box",
            NodeKind::Person => "",
        }
    }
}

/// Handle to a node, rendered as `_<n>` where `n` is the creation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

impl NodeRef {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}", self.0)
    }
}

/// Handle to a group node. Only groups accept members and guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupRef(NodeRef);

impl GroupRef {
    pub fn node(self) -> NodeRef {
        self.0
    }

    pub fn member(self, graph: &mut Graph, node: NodeRef) {
        graph.connect(self, node, Membership::Member);
    }

    pub fn guest(self, graph: &mut Graph, node: NodeRef) {
        graph.connect(self, node, Membership::Guest);
    }
}

impl From<GroupRef> for NodeRef {
    fn from(group: GroupRef) -> Self {
        group.0
    }
}

/// How a node belongs to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Member,
    Guest,
}

impl Membership {
    pub fn style(self) -> &'static str {
        match self {
            Membership::Member => "",
            Membership::Guest => "style=dashed label=guest",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeRef,
    pub label: String,
    pub kind: NodeKind,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeRef,
    pub target: NodeRef,
    pub style: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    next_id: usize,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, label: &str, kind: NodeKind, style: &str) -> NodeRef {
        let id = NodeRef(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node {
            id,
            label: label.to_string(),
            kind,
            style: style.to_string(),
        });
        id
    }

    pub fn add_group(&mut self, label: &str) -> GroupRef {
        GroupRef(self.add_node(label, NodeKind::Group, NodeKind::Group.default_style()))
    }

    pub fn add_person(&mut self, label: &str) -> NodeRef {
        self.add_node(label, NodeKind::Person, NodeKind::Person.default_style())
    }

    /// Records an edge from `source` into the group `target`.
    pub fn connect(&mut self, target: GroupRef, source: NodeRef, membership: Membership) {
        self.push_edge(source, target.node(), membership.style(), None);
    }

    pub fn edge(&mut self, source: impl Into<NodeRef>, target: impl Into<NodeRef>, style: &str) {
        self.push_edge(source.into(), target.into(), style, None);
    }

    /// Like [`Graph::edge`], with a label the serializer quotes and escapes.
    pub fn labeled_edge(
        &mut self,
        source: impl Into<NodeRef>,
        target: impl Into<NodeRef>,
        label: &str,
        style: &str,
    ) {
        self.push_edge(source.into(), target.into(), style, Some(label.to_string()));
    }

    fn push_edge(&mut self, source: NodeRef, target: NodeRef, style: &str, label: Option<String>) {
        debug_assert!(
            source.0 < self.next_id && target.0 < self.next_id,
            "edge endpoint {source} or {target} does not belong to this graph"
        );
        self.edges.push(Edge {
            source,
            target,
            style: style.to_string(),
            label,
        });
    }

    pub fn node(&self, id: NodeRef) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn render(&self) -> String {
        dot::render(self, &DotConfig::default())
    }

    pub fn render_with(&self, config: &DotConfig) -> String {
        dot::render(self, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_creation_order() {
        let mut g = Graph::new();
        let low = g.add_group("Low");
        let sparhawk = g.add_person("Alan Sparhawk");
        let parker = g.add_person("Mimi Parker");
        assert_eq!(low.node().to_string(), "_0");
        assert_eq!(sparhawk.to_string(), "_1");
        assert_eq!(parker.to_string(), "_2");
        let ids: Vec<usize> = g.nodes().iter().map(|n| n.id.index()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn group_and_person_default_styles() {
        let mut g = Graph::new();
        let swans = g.add_group("Swans");
        let gira = g.add_person("Michael Gira");
        assert_eq!(g.node(swans.node()).unwrap().style, "shape=box");
        assert_eq!(g.node(swans.node()).unwrap().kind, NodeKind::Group);
        assert_eq!(g.node(gira).unwrap().style, "");
        assert_eq!(g.node(gira).unwrap().kind, NodeKind::Person);
    }

    #[test]
    fn add_group_does_not_deduplicate() {
        let mut g = Graph::new();
        let a = g.add_group("Low");
        let b = g.add_group("Low");
        assert_ne!(a, b);
        assert_eq!(g.nodes().len(), 2);
    }

    #[test]
    fn member_and_guest_point_into_group() {
        let mut g = Graph::new();
        let angels = g.add_group("Angels of Light");
        let gira = g.add_person("Michael Gira");
        let harris = g.add_person("Thor Harris");
        angels.member(&mut g, gira);
        angels.guest(&mut g, harris);

        let edges = g.edges();
        assert_eq!(edges.len(), 2);
        assert_eq!((edges[0].source, edges[0].target), (gira, angels.node()));
        assert_eq!(edges[0].style, "");
        assert_eq!((edges[1].source, edges[1].target), (harris, angels.node()));
        assert_eq!(edges[1].style, "style=dashed label=guest");
        assert_eq!(edges[1].label, None);
    }

    #[test]
    fn generic_edge_between_groups() {
        let mut g = Graph::new();
        let low = g.add_group("Low");
        let gybe = g.add_group("Godspeed You! Black Emperor");
        g.edge(low, gybe, "label=\"live performance\" style=dotted dir=none");
        assert_eq!(g.edges()[0].source, low.node());
        assert_eq!(g.edges()[0].target, gybe.node());
    }

    #[test]
    fn labeled_edge_keeps_label_apart_from_style() {
        let mut g = Graph::new();
        let megadeth = g.add_group("Megadeth");
        let mustaine = g.add_person("Dave Mustaine");
        g.labeled_edge(mustaine, megadeth, "lead", "");
        assert_eq!(g.edges()[0].label.as_deref(), Some("lead"));
        assert_eq!(g.edges()[0].style, "");
    }

    #[test]
    fn add_node_overrides_style() {
        let mut g = Graph::new();
        let n = g.add_node("Listener", NodeKind::Group, "shape=ellipse color=red");
        assert_eq!(g.node(n).unwrap().style, "shape=ellipse color=red");
    }

    #[test]
    fn render_is_repeatable() {
        let mut g = Graph::new();
        let low = g.add_group("Low");
        let parker = g.add_person("Mimi Parker");
        low.member(&mut g, parker);
        assert_eq!(g.render(), g.render());
    }
}
