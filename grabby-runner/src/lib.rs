//! # grabby-runner
//!
//! Runs the `spz2ply` conversion script as a child process and captures its
//! output, enforcing a wall-clock timeout.
//!
//! Call [`run_conversion`] with the toolchain root; see [`RunnerConfig`] for
//! the timeout.

pub mod error;
pub mod process;

pub use error::RunnerError;
pub use process::{run_conversion, ConversionOutput, RunnerConfig, CONVERSION_TIMEOUT};
