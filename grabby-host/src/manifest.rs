//! Browser registration manifest for the native host.
//!
//! Browsers locate a native-messaging host through a small JSON document that
//! names the host, points at its executable and lists the extension origins
//! allowed to connect.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Name the extension passes to `connectNative` / `sendNativeMessage`.
pub const HOST_NAME: &str = "com.grabby.spz2ply";
pub const HOST_DESCRIPTION: &str = "Grabby SPZ2PLY native messaging host";

const EXTENSION_SCHEME: &str = "chrome-extension://";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostManifest {
    pub name: String,
    pub description: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub allowed_origins: Vec<String>,
}

/// Build the manifest for the host binary at `binary_path`.
pub fn generate_manifest(binary_path: &Path, extension_ids: &[String]) -> HostManifest {
    HostManifest {
        name: HOST_NAME.to_string(),
        description: HOST_DESCRIPTION.to_string(),
        path: binary_path.display().to_string(),
        kind: "stdio".to_string(),
        allowed_origins: extension_ids
            .iter()
            .map(|id| extension_origin(id))
            .collect(),
    }
}

/// `abc` -> `chrome-extension://abc/`; a full origin is kept as given.
pub fn extension_origin(id: &str) -> String {
    let id = id.trim();
    if id.starts_with(EXTENSION_SCHEME) {
        if id.ends_with('/') {
            id.to_string()
        } else {
            format!("{id}/")
        }
    } else {
        format!("{EXTENSION_SCHEME}{}/", id.trim_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn manifest_contains_required_fields() {
        let manifest = generate_manifest(
            Path::new("/opt/grabby/native-host/grabby-native-host"),
            &["kpdhgjmpibjlajlhagbgmnpjifbdbjhd".to_string()],
        );
        let value = serde_json::to_value(&manifest).expect("encode manifest");

        assert_eq!(value["name"], Value::from("com.grabby.spz2ply"));
        assert_eq!(value["type"], Value::from("stdio"));
        assert_eq!(
            value["path"],
            Value::from("/opt/grabby/native-host/grabby-native-host")
        );
        assert_eq!(
            value["allowed_origins"],
            serde_json::json!(["chrome-extension://kpdhgjmpibjlajlhagbgmnpjifbdbjhd/"])
        );
    }

    #[test]
    fn origins_are_normalised() {
        assert_eq!(extension_origin("abc"), "chrome-extension://abc/");
        assert_eq!(extension_origin(" abc/ "), "chrome-extension://abc/");
        assert_eq!(
            extension_origin("chrome-extension://abc"),
            "chrome-extension://abc/"
        );
        assert_eq!(
            extension_origin("chrome-extension://abc/"),
            "chrome-extension://abc/"
        );
    }
}
