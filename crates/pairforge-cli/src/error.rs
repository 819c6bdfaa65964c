use std::path::PathBuf;

use thiserror::Error;

/// Abort conditions surfaced to the user. Every abort exits with code 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] pairforge_core::ValidationError),

    #[error("file already exists: {} (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    #[error("failed writing to {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        1
    }
}
