use thiserror::Error;
use winnow::ascii::space0;
use winnow::combinator::{delimited, opt};
use winnow::prelude::*;
use winnow::token::{rest, take_till};

use crate::graph::NodeKind;
use crate::ident::{group_key, has_key_tokens, person_key};
use crate::outline::{Connection, Outline};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected indented line {line}: '{text}'")]
    UnexpectedIndentation { line: usize, text: String },

    #[error("malformed line {line}: '{text}'")]
    MalformedLine { line: usize, text: String },
}

/// Parses an outline.
///
/// Unindented lines open a section naming a group; indented lines attach a
/// `{label} Group` or `[label] Person` to the open section. Lines whose first
/// non-blank character is `?` are comments.
pub fn parse_outline(input: &str) -> Result<Outline, ParseError> {
    let mut outline = Outline::default();
    let mut section: Option<&str> = None;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let body = line.trim();

        if body.starts_with('?') || body.is_empty() {
            tracing::trace!(line = line_no, "skipping");
            continue;
        }

        let malformed = || ParseError::MalformedLine {
            line: line_no,
            text: line.to_string(),
        };

        if !line.starts_with(char::is_whitespace) {
            tracing::debug!(line = line_no, group = body, "section");
            outline.groups.insert(body.to_string());
            section = Some(body);
            continue;
        }

        let Some(current) = section else {
            return Err(ParseError::UnexpectedIndentation {
                line: line_no,
                text: line.to_string(),
            });
        };

        let attached = parse_attached(body).ok_or_else(malformed)?;
        let (source, source_kind) = match attached.kind {
            NodeKind::Group => {
                outline.groups.insert(attached.name.to_string());
                (group_key(attached.name), NodeKind::Group)
            }
            NodeKind::Person => {
                outline.persons.insert(attached.name.to_string());
                (person_key(attached.name), NodeKind::Person)
            }
        };
        tracing::trace!(line = line_no, %source, section = current, "attach");
        outline.connections.push(Connection {
            source,
            source_kind,
            target: group_key(current),
            label: attached.label.map(String::from),
        });
    }

    tracing::debug!(
        groups = outline.groups.len(),
        persons = outline.persons.len(),
        connections = outline.connections.len(),
        "parsed outline"
    );
    Ok(outline)
}

#[derive(Debug, PartialEq)]
struct Attached<'s> {
    kind: NodeKind,
    name: &'s str,
    label: Option<&'s str>,
}

/// Classifies the trimmed text of an indented line.
///
/// Group names may be any text; a person's key needs a first token, so a person
/// name without ASCII letters or digits is refused.
fn parse_attached(body: &str) -> Option<Attached<'_>> {
    let attached = {
        let mut input = body;
        match group_ref(&mut input) {
            Ok((label, name)) => Attached {
                kind: NodeKind::Group,
                name,
                label,
            },
            Err(_) => {
                let mut input = body;
                let (label, name) = person_ref(&mut input).ok()?;
                Attached {
                    kind: NodeKind::Person,
                    name,
                    label,
                }
            }
        }
    };

    (attached.kind == NodeKind::Group || has_key_tokens(attached.name)).then_some(attached)
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty()).then_some(s)
}

fn group_ref<'s>(input: &mut &'s str) -> winnow::Result<(Option<&'s str>, &'s str)> {
    let label = delimited('{', take_till(0.., '}'), '}').parse_next(input)?;
    space0.parse_next(input)?;
    let name = rest
        .verify(|s: &str| !s.trim().is_empty())
        .parse_next(input)?;
    Ok((non_empty(label), name.trim()))
}

/// `[label]` ahead of a name. The label never contains `}` and runs to the last
/// `]` that still leaves a name behind it.
fn bracket_label<'s>(input: &mut &'s str) -> winnow::Result<&'s str> {
    '['.parse_next(input)?;
    let s: &'s str = *input;
    let limit = s.find('}').unwrap_or(s.len());
    let close = s[..limit]
        .rmatch_indices(']')
        .map(|(i, _)| i)
        .find(|&i| !s[i + 1..].trim().is_empty());
    let Some(close) = close else {
        return Err(winnow::error::ParserError::from_input(input));
    };
    *input = &s[close + 1..];
    space0.parse_next(input)?;
    Ok(&s[..close])
}

fn person_ref<'s>(input: &mut &'s str) -> winnow::Result<(Option<&'s str>, &'s str)> {
    let label = opt(bracket_label).parse_next(input)?;
    let name = rest.parse_next(input)?;
    Ok((label.and_then(non_empty), name.trim()))
}
