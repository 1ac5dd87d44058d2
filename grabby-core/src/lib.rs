//! Grabby core library — wire types, toolchain layout, errors.
//!
//! Public API surface:
//! - [`types`] — requests, responses and the two report shapes
//! - [`paths`] — where the `spz2ply` toolchain lives and what it must contain
//! - [`error`] — [`CoreError`]

pub mod error;
pub mod paths;
pub mod types;

pub use error::CoreError;
pub use types::{
    Action, ConversionResult, ErrorResponse, ProbeFailure, Request, Response, StatusSnapshot,
    ToolchainChecks,
};
