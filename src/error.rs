use thiserror::Error;

use crate::config::ConfigError;
use crate::outline_parser::ParseError;
use crate::script_parser::ScriptError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("connection refers to unknown key `{0}`")]
    UnresolvedKey(String),
}
