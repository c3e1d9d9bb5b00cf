pub mod config;
pub mod display_width;
pub mod dot;
pub mod error;
pub mod graph;
pub mod ident;
pub mod ordered_set;
pub mod outline;
pub mod outline_parser;
pub mod script;
pub mod script_parser;

pub use config::DotConfig;
pub use error::Error;
pub use graph::{Graph, GroupRef, Membership, NodeKind, NodeRef};

/// Text accepted by [`build_graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// Indented band/musician outline.
    #[default]
    Outline,
    /// Graph script as produced by [`outline_to_script`].
    Script,
}

/// Renders an outline as DOT with the default header.
pub fn render(input: &str) -> Result<String, Error> {
    render_with_options(input, Source::Outline, &DotConfig::default())
}

pub fn render_with_options(input: &str, source: Source, config: &DotConfig) -> Result<String, Error> {
    Ok(build_graph(input, source)?.render_with(config))
}

pub fn build_graph(input: &str, source: Source) -> Result<Graph, Error> {
    match source {
        Source::Outline => outline_parser::parse_outline(input)?.to_graph(),
        Source::Script => Ok(script_parser::run_script(input)?),
    }
}

/// Rewrites an outline as graph-script statements.
pub fn outline_to_script(input: &str) -> Result<String, Error> {
    let outline = outline_parser::parse_outline(input)?;
    Ok(script::format_script(&outline))
}
