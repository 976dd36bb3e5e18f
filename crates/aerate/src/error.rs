//! CLI error types.

use std::path::PathBuf;

use aerate_config::ConfigError;
use aerate_tree::TreeError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{}: {source}", path.display())]
    Tree {
        path: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error("{0}")]
    Validation(String),
}
