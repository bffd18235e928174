//! Error type for the enigma-sim front end.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Engine rejected a configuration, letter, or position
    #[error(transparent)]
    Machine(#[from] enigma_sim_core::Error),

    /// Command line could not be parsed
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// Invalid combination of options
    #[error("configuration error: {0}")]
    Config(String),

    /// Logging could not be initialised
    #[error("logging: {0}")]
    Logging(#[from] crate::logging::InitError),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
