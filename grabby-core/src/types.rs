//! Wire types exchanged with the browser extension.
//!
//! Requests arrive as arbitrary JSON objects carrying an `action` string.
//! Responses form a closed set of shapes; [`Response`] serializes untagged so
//! each variant appears on the wire exactly as its inner record.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub const CHECK_SPZ2PLY: &str = "checkSpz2ply";
pub const RUN_SPZ2PLY: &str = "runSpz2ply";

/// The operation a request selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Report toolchain readiness.
    CheckSpz2ply,
    /// Run the conversion script.
    RunSpz2ply,
    /// Anything else, carrying the raw action text.
    Unknown(String),
}

impl From<&str> for Action {
    fn from(s: &str) -> Self {
        match s {
            CHECK_SPZ2PLY => Self::CheckSpz2ply,
            RUN_SPZ2PLY => Self::RunSpz2ply,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckSpz2ply => f.write_str(CHECK_SPZ2PLY),
            Self::RunSpz2ply => f.write_str(RUN_SPZ2PLY),
            Self::Unknown(other) => f.write_str(other),
        }
    }
}

/// One decoded request. Fields other than `action` are kept but unused.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub action: Action,
    pub fields: Map<String, Value>,
}

impl Request {
    /// Interpret a decoded message as a request.
    ///
    /// A missing `action` reads as the empty string; a non-string `action`
    /// reads as its JSON text. Only non-object messages are rejected.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let Value::Object(mut fields) = value else {
            return Err(CoreError::InvalidRequest(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        };

        let action = match fields.remove("action") {
            None => String::new(),
            Some(Value::String(s)) => s,
            Some(other) => other.to_string(),
        };

        Ok(Self {
            action: Action::from(action.as_str()),
            fields,
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Status report
// ---------------------------------------------------------------------------

/// Raw results of the individual toolchain checks, before any verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolchainChecks {
    pub directory_exists: bool,
    pub import_dir_exists: bool,
    pub export_dir_exists: bool,
    pub node_modules_exists: bool,
    pub package_json_exists: bool,
    pub auto_convert_exists: bool,
    pub run_bat_exists: bool,
    pub import_files_count: usize,
    pub export_files_count: usize,
}

impl ToolchainChecks {
    /// True when every required marker is present. Counts do not participate.
    pub fn all_present(&self) -> bool {
        self.directory_exists
            && self.import_dir_exists
            && self.export_dir_exists
            && self.node_modules_exists
            && self.package_json_exists
            && self.auto_convert_exists
            && self.run_bat_exists
    }
}

/// Readiness report for the conversion toolchain.
///
/// Built via `From<ToolchainChecks>`, which derives `available` from the
/// completed checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub available: bool,
    pub directory_exists: bool,
    pub import_dir_exists: bool,
    pub export_dir_exists: bool,
    pub node_modules_exists: bool,
    pub package_json_exists: bool,
    pub auto_convert_exists: bool,
    pub run_bat_exists: bool,
    pub import_files_count: usize,
    pub export_files_count: usize,
    pub error: Option<String>,
}

impl From<ToolchainChecks> for StatusSnapshot {
    fn from(checks: ToolchainChecks) -> Self {
        Self {
            available: checks.all_present(),
            directory_exists: checks.directory_exists,
            import_dir_exists: checks.import_dir_exists,
            export_dir_exists: checks.export_dir_exists,
            node_modules_exists: checks.node_modules_exists,
            package_json_exists: checks.package_json_exists,
            auto_convert_exists: checks.auto_convert_exists,
            run_bat_exists: checks.run_bat_exists,
            import_files_count: checks.import_files_count,
            export_files_count: checks.export_files_count,
            error: None,
        }
    }
}

/// Probe failure report; replaces the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeFailure {
    pub available: bool,
    pub error: String,
}

impl ProbeFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            available: false,
            error: error.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversion report
// ---------------------------------------------------------------------------

/// Outcome of one conversion run.
///
/// Either the capture fields (`stdout`, `stderr`, `returncode`) or `error` are
/// set, never both. Use [`ConversionResult::completed`] and
/// [`ConversionResult::failed`] to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returncode: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResult {
    /// The process ran to exit; success iff it exited with code zero.
    pub fn completed(returncode: i32, stdout: String, stderr: String) -> Self {
        Self {
            success: returncode == 0,
            stdout: Some(stdout),
            stderr: Some(stderr),
            returncode: Some(returncode),
            error: None,
        }
    }

    /// The process could not be launched or did not finish in time.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: None,
            stderr: None,
            returncode: None,
            error: Some(error.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Generic `{error}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every shape the host writes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Status(StatusSnapshot),
    StatusFailed(ProbeFailure),
    Conversion(ConversionResult),
    Error(ErrorResponse),
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorResponse {
            error: message.into(),
        })
    }

    pub fn unknown_action(action: &Action) -> Self {
        Self::error(format!("Unknown action: {action}"))
    }

    /// Last-resort report for a failure that escaped every handler.
    pub fn host_error(message: impl fmt::Display) -> Self {
        Self::error(format!("Native host error: {message}"))
    }
}

impl From<StatusSnapshot> for Response {
    fn from(snapshot: StatusSnapshot) -> Self {
        Self::Status(snapshot)
    }
}

impl From<ProbeFailure> for Response {
    fn from(failure: ProbeFailure) -> Self {
        Self::StatusFailed(failure)
    }
}

impl From<ConversionResult> for Response {
    fn from(result: ConversionResult) -> Self {
        Self::Conversion(result)
    }
}
