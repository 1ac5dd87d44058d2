//! Native-messaging host: framed stdio channel, action dispatch, host loop.

pub mod channel;
pub mod config;
pub mod dispatch;
mod error;
mod host;
pub mod manifest;

pub use channel::{encode_frame, FramedChannel};
pub use config::HostConfig;
pub use dispatch::dispatch;
pub use error::HostError;
pub use host::{init_tracing, report_fatal, Host, HostState};
pub use manifest::{generate_manifest, HostManifest};
