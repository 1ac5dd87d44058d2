//! Length-prefixed JSON framing used by browser native messaging.
//!
//! Every message in either direction is a 4-byte little-endian `u32` length
//! followed by that many bytes of UTF-8 JSON. No size limit is applied here.

use std::io::{ErrorKind, Read, Write};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{io_err, HostError};

const PREFIX_LEN: usize = 4;

/// Encode `payload` as one complete frame.
pub fn encode_frame<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>, HostError> {
    let body = serde_json::to_vec(payload)?;
    let len = u32::try_from(body.len()).map_err(|_| {
        HostError::MalformedMessage(format!(
            "payload of {} bytes does not fit a u32 length prefix",
            body.len()
        ))
    })?;

    let mut frame = Vec::with_capacity(PREFIX_LEN + body.len());
    frame.extend_from_slice(&len.to_le_bytes());
    frame.extend_from_slice(&body);
    Ok(frame)
}

/// Owns the two byte streams and speaks the framing over them.
///
/// The host hands it stdin/stdout; tests hand it in-memory buffers.
pub struct FramedChannel<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> FramedChannel<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Read the next message.
    ///
    /// Returns `Ok(None)` when the input closes before a full length prefix
    /// arrives. A prefix followed by a short or undecodable payload is a
    /// [`HostError::MalformedMessage`].
    pub fn read_message(&mut self) -> Result<Option<Value>, HostError> {
        let Some(len) = self.read_prefix()? else {
            return Ok(None);
        };

        let mut body = Vec::new();
        self.reader
            .by_ref()
            .take(u64::from(len))
            .read_to_end(&mut body)
            .map_err(|e| io_err("stdin", e))?;
        if body.len() < len as usize {
            return Err(HostError::MalformedMessage(format!(
                "expected {len} bytes, stream ended after {}",
                body.len()
            )));
        }

        let text = std::str::from_utf8(&body)
            .map_err(|e| HostError::MalformedMessage(format!("payload is not UTF-8: {e}")))?;
        let value = serde_json::from_str(text)
            .map_err(|e| HostError::MalformedMessage(format!("payload is not JSON: {e}")))?;

        debug!(bytes = len, "read message");
        Ok(Some(value))
    }

    /// Write one message and flush.
    pub fn write_message<T: Serialize + ?Sized>(&mut self, payload: &T) -> Result<(), HostError> {
        let frame = encode_frame(payload)?;
        self.writer
            .write_all(&frame)
            .map_err(|e| io_err("stdout", e))?;
        self.writer.flush().map_err(|e| io_err("stdout", e))?;
        debug!(bytes = frame.len() - PREFIX_LEN, "wrote message");
        Ok(())
    }

    /// Give back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    fn read_prefix(&mut self) -> Result<Option<u32>, HostError> {
        let mut prefix = [0u8; PREFIX_LEN];
        let mut filled = 0;
        while filled < PREFIX_LEN {
            match self.reader.read(&mut prefix[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(io_err("stdin", err)),
            }
        }

        match filled {
            PREFIX_LEN => Ok(Some(u32::from_le_bytes(prefix))),
            0 => Ok(None),
            partial => {
                warn!(bytes = partial, "input closed inside a length prefix");
                Ok(None)
            }
        }
    }
}
