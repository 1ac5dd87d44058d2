//! Grabby native host — bridges the browser extension to the local
//! `spz2ply` conversion toolchain over native messaging.
//!
//! # Usage
//!
//! ```text
//! grabby-native-host [ORIGIN]...                  serve framed stdio (browser launch)
//! grabby-native-host --check                      print toolchain status and exit
//! grabby-native-host --print-manifest --extension-id <ID>...
//! ```
//!
//! Browsers launch the host with the caller's origin (and on Windows a
//! `--parent-window=<n>` flag); those arguments are accepted and ignored.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use grabby_host::{generate_manifest, init_tracing, report_fatal, Host, HostConfig};

#[derive(Parser, Debug)]
#[command(
    name = "grabby-native-host",
    version,
    about = "Native messaging host for the Grabby SPZ2PLY conversion toolchain",
    long_about = None,
)]
struct Cli {
    /// Use this toolchain directory instead of the one next to the install dir.
    #[arg(long, value_name = "PATH")]
    spz2ply_dir: Option<PathBuf>,

    /// Print the toolchain status as JSON and exit.
    #[arg(long, conflicts_with = "print_manifest")]
    check: bool,

    /// Print a browser native-messaging manifest for this executable and exit.
    #[arg(long, requires = "extension_id")]
    print_manifest: bool,

    /// Extension id (or full origin) allowed to connect; repeatable.
    #[arg(long = "extension-id", value_name = "ID")]
    extension_id: Vec<String>,

    /// Arguments supplied by the launching browser.
    #[arg(
        value_name = "BROWSER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        hide = true
    )]
    browser_args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();
    tracing::debug!(args = ?cli.browser_args, "launched");

    if cli.print_manifest {
        return print_manifest(&cli.extension_id);
    }

    let config = match cli.spz2ply_dir {
        Some(dir) => HostConfig::new(dir),
        None if cli.check => {
            HostConfig::from_current_exe().context("failed to locate spz2ply directory")?
        }
        None => match HostConfig::from_current_exe() {
            Ok(config) => config,
            Err(err) => {
                report_fatal(io::stdout().lock(), &err).context("failed to report startup error")?;
                return Ok(());
            }
        },
    };

    if cli.check {
        return print_status(&config);
    }

    let mut host = Host::new(io::stdin().lock(), io::stdout().lock(), config);
    host.run().context("native host lost its output stream")
}

fn print_status(config: &HostConfig) -> Result<()> {
    let snapshot = grabby_probe::probe_status(config.root())
        .with_context(|| format!("failed to probe {}", config.root().display()))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&snapshot).context("failed to render status JSON")?
    );
    Ok(())
}

fn print_manifest(extension_ids: &[String]) -> Result<()> {
    let exe = std::env::current_exe().context("could not determine executable path")?;
    let manifest = generate_manifest(&exe, extension_ids);
    println!(
        "{}",
        serde_json::to_string_pretty(&manifest).context("failed to render manifest JSON")?
    );
    Ok(())
}
