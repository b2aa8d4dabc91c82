use std::path::PathBuf;
use thiserror::Error;
use valencefit::core::forcefield::energy::EnergyError;
use valencefit::core::forcefield::params::ParamFileError;
use valencefit::core::symmetry::SymmetryError;
use valencefit::core::typing::TypingError;
use valencefit::fitting::FittingError;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Fitting(#[from] FittingError),

    #[error(transparent)]
    Symmetry(#[from] SymmetryError),

    #[error(transparent)]
    Typing(#[from] TypingError),

    #[error(transparent)]
    Energy(#[from] EnergyError),

    #[error("Failed to access parameter file '{path}': {source}", path = path.display())]
    ParamFile {
        path: PathBuf,
        #[source]
        source: ParamFileError,
    },

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
