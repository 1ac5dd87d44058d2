use std::fmt;
use std::io::{Read, Write};

use grabby_core::{Request, Response};

use crate::channel::FramedChannel;
use crate::config::HostConfig;
use crate::dispatch::dispatch;
use crate::error::HostError;

/// Lifecycle of the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostState {
    Running,
    Stopped,
}

/// The request/response loop over one pair of streams.
///
/// Strictly sequential: each request is answered before the next is read.
pub struct Host<R, W> {
    channel: FramedChannel<R, W>,
    config: HostConfig,
    state: HostState,
    served: usize,
}

impl<R: Read, W: Write> Host<R, W> {
    pub fn new(reader: R, writer: W, config: HostConfig) -> Self {
        Self {
            channel: FramedChannel::new(reader, writer),
            config,
            state: HostState::Running,
            served: 0,
        }
    }

    pub fn state(&self) -> HostState {
        self.state
    }

    /// Number of requests answered so far.
    pub fn served(&self) -> usize {
        self.served
    }

    /// Serve until the input closes or an unrecoverable failure occurs.
    ///
    /// An unrecoverable failure is reported to the peer as a single
    /// `Native host error` response before stopping. Only a failure to write
    /// that report is returned.
    pub fn run(&mut self) -> Result<(), HostError> {
        tracing::info!(root = %self.config.root().display(), "native host started");

        while self.state == HostState::Running {
            if let Err(err) = self.step() {
                self.state = HostState::Stopped;
                tracing::error!(error = %err, served = self.served, "native host failed");
                self.channel.write_message(&Response::host_error(&err))?;
                return Ok(());
            }
        }

        tracing::info!(served = self.served, "input closed, native host stopping");
        Ok(())
    }

    /// Handle at most one request.
    pub fn step(&mut self) -> Result<HostState, HostError> {
        if self.state == HostState::Stopped {
            return Ok(HostState::Stopped);
        }

        let Some(message) = self.channel.read_message()? else {
            self.state = HostState::Stopped;
            return Ok(self.state);
        };

        let request = Request::from_value(message)?;
        let response = dispatch(&request, &self.config);
        self.channel.write_message(&response)?;
        self.served += 1;
        Ok(self.state)
    }

    pub fn into_inner(self) -> (R, W) {
        self.channel.into_inner()
    }
}

/// Report a failure that happened before a [`Host`] could be built.
pub fn report_fatal<W: Write>(writer: W, err: &dyn fmt::Display) -> Result<(), HostError> {
    tracing::error!(error = %err, "native host could not start");
    let mut channel = FramedChannel::new(std::io::empty(), writer);
    channel.write_message(&Response::host_error(err))
}

/// Log to stderr; stdout carries protocol frames only.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
