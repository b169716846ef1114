pub mod config;
pub mod core;
pub mod distributions;
pub mod error;
#[cfg(feature = "csv")]
pub mod io;
pub mod metropolis;
pub mod report;
pub mod rng;
pub mod stats;
