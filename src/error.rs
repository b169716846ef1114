//! Error type shared by the sampler, its configuration and its reporters.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SamplerError {
    #[error("proposal width must be finite and in (0, {max}], got {width}")]
    InvalidWidth { width: f64, max: f64 },

    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("report interval must be positive")]
    ZeroReportInterval,

    #[error("initial state must lie in (0, 1], got {0}")]
    InvalidInitialState(f64),

    /// The chain sits at exactly zero, where the Metropolis ratio `y / x` is undefined.
    #[error("chain state reached 0 at iteration {iteration}; the Metropolis ratio is undefined")]
    DegenerateState { iteration: usize },

    #[error("could not derive a seed from the system clock")]
    Seed(#[from] std::time::SystemTimeError),

    #[error("failed to write report")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "csv")]
    #[error("failed to write csv report")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SamplerError>;
