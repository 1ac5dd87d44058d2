//! Action dispatch: one request in, one response out, never an error.

use grabby_core::{Action, ConversionResult, ProbeFailure, Request, Response};
use tracing::{debug, warn};

use crate::config::HostConfig;

/// Route `request` to its handler and fold any handler failure into the
/// response shape that handler owns.
pub fn dispatch(request: &Request, config: &HostConfig) -> Response {
    debug!(action = %request.action, "dispatching request");

    match &request.action {
        Action::CheckSpz2ply => match grabby_probe::probe_status(config.root()) {
            Ok(snapshot) => snapshot.into(),
            Err(err) => {
                warn!(error = %err, "toolchain probe failed");
                ProbeFailure::new(err.to_string()).into()
            }
        },
        Action::RunSpz2ply => match grabby_runner::run_conversion(config.root(), &config.runner) {
            Ok(output) => {
                ConversionResult::completed(output.returncode, output.stdout, output.stderr).into()
            }
            Err(err) => {
                warn!(error = %err, "conversion failed");
                ConversionResult::failed(err.to_string()).into()
            }
        },
        unknown @ Action::Unknown(_) => Response::unknown_action(unknown),
    }
}
