use std::collections::HashMap;

use thiserror::Error;
use winnow::ascii::{space0, space1};
use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::{one_of, rest, take_while};

use crate::graph::{Graph, GroupRef, Membership, NodeKind, NodeRef};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("syntax error on line {line}: '{text}'")]
    Syntax { line: usize, text: String },

    #[error("line {line}: unknown name `{name}`")]
    UnknownBinding { line: usize, name: String },

    #[error("line {line}: `{name}` is not a band")]
    NotAGroup { line: usize, name: String },
}

#[derive(Debug, Clone, PartialEq)]
enum Statement<'s> {
    Bind {
        name: &'s str,
        kind: NodeKind,
        label: String,
    },
    Attach {
        group: &'s str,
        membership: Membership,
        node: &'s str,
    },
    Edge {
        source: &'s str,
        target: &'s str,
        style: String,
    },
}

#[derive(Debug, Clone, Copy)]
enum Binding {
    Group(GroupRef),
    Node(NodeRef),
}

impl Binding {
    fn node(self) -> NodeRef {
        match self {
            Binding::Group(group) => group.node(),
            Binding::Node(node) => node,
        }
    }
}

/// Executes a graph script, one statement per line.
///
/// Names are bound by `name = g.band '...'` or `name = g.person '...'`; a later
/// binding of the same name shadows the earlier one. `#` starts a comment.
pub fn run_script(input: &str) -> Result<Graph, ScriptError> {
    let mut graph = Graph::new();
    let mut bindings: HashMap<&str, Binding> = HashMap::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let body = line.trim();
        if body.is_empty() || body.starts_with('#') {
            continue;
        }

        let statement = script_line.parse(body).map_err(|_| ScriptError::Syntax {
            line: line_no,
            text: line.to_string(),
        })?;
        tracing::trace!(line = line_no, ?statement, "statement");

        match statement {
            Statement::Bind { name, kind, label } => {
                let binding = match kind {
                    NodeKind::Group => Binding::Group(graph.add_group(&label)),
                    NodeKind::Person => Binding::Node(graph.add_person(&label)),
                };
                bindings.insert(name, binding);
            }
            Statement::Attach {
                group,
                membership,
                node,
            } => {
                let Binding::Group(target) = resolve(&bindings, group, line_no)? else {
                    return Err(ScriptError::NotAGroup {
                        line: line_no,
                        name: group.to_string(),
                    });
                };
                let source = resolve(&bindings, node, line_no)?.node();
                graph.connect(target, source, membership);
            }
            Statement::Edge {
                source,
                target,
                style,
            } => {
                let source = resolve(&bindings, source, line_no)?.node();
                let target = resolve(&bindings, target, line_no)?.node();
                graph.edge(source, target, &style);
            }
        }
    }

    tracing::debug!(
        nodes = graph.nodes().len(),
        edges = graph.edges().len(),
        "ran script"
    );
    Ok(graph)
}

fn resolve(bindings: &HashMap<&str, Binding>, name: &str, line: usize) -> Result<Binding, ScriptError> {
    bindings
        .get(name)
        .copied()
        .ok_or_else(|| ScriptError::UnknownBinding {
            line,
            name: name.to_string(),
        })
}

fn script_line<'s>(input: &mut &'s str) -> winnow::Result<Statement<'s>> {
    let statement = alt((bind, attach, styled_edge)).parse_next(input)?;
    space0.parse_next(input)?;
    opt(('#', rest)).parse_next(input)?;
    Ok(statement)
}

fn identifier<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn bind<'s>(input: &mut &'s str) -> winnow::Result<Statement<'s>> {
    let name = identifier.parse_next(input)?;
    (space0, '=', space0, "g.").parse_next(input)?;
    let kind = alt((
        "band".value(NodeKind::Group),
        "person".value(NodeKind::Person),
    ))
    .parse_next(input)?;
    space1.parse_next(input)?;
    let label = string_literal.parse_next(input)?;
    Ok(Statement::Bind { name, kind, label })
}

fn attach<'s>(input: &mut &'s str) -> winnow::Result<Statement<'s>> {
    let group = identifier.parse_next(input)?;
    '.'.parse_next(input)?;
    let membership = alt((
        "member".value(Membership::Member),
        "guest".value(Membership::Guest),
    ))
    .parse_next(input)?;
    space1.parse_next(input)?;
    let node = identifier.parse_next(input)?;
    Ok(Statement::Attach {
        group,
        membership,
        node,
    })
}

fn styled_edge<'s>(input: &mut &'s str) -> winnow::Result<Statement<'s>> {
    let source = identifier.parse_next(input)?;
    ".edge".parse_next(input)?;
    space1.parse_next(input)?;
    let target = identifier.parse_next(input)?;
    (space0, ',', space0).parse_next(input)?;
    let style = string_literal.parse_next(input)?;
    Ok(Statement::Edge {
        source,
        target,
        style,
    })
}

/// `'...'` or `"..."`. A backslash escapes a backslash or the enclosing quote and
/// is kept before any other character.
fn string_literal(input: &mut &str) -> winnow::Result<String> {
    let quote = one_of(['\'', '"']).parse_next(input)?;
    let s: &str = *input;
    let mut out = String::new();
    let mut chars = s.char_indices();
    while let Some((i, ch)) = chars.next() {
        if ch == quote {
            *input = &s[i + ch.len_utf8()..];
            return Ok(out);
        }
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some((_, next)) if next == '\\' || next == quote => out.push(next),
            Some((_, next)) => {
                out.push('\\');
                out.push(next);
            }
            None => break,
        }
    }
    Err(winnow::error::ParserError::from_input(input))
}
