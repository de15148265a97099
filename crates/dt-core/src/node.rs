//! Node.js subprocess plugin wrappers
//!
//! For every manifest entry of kind `node` whose entry file exists on
//! disk, the factory synthesizes a command node that forwards all
//! trailing arguments to `node <bin> [...args]` as a child process,
//! with inherited standard streams, and mirrors the child's exit code.
//!
//! Each wrapper is its own struct instance owning its binary path;
//! wrappers never share captured state, so two manifest entries can
//! never route to each other's binaries.

use clap::{Arg, ArgMatches, Command};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;

use crate::error::{Error, Result};
use crate::manifest::PluginManifest;
use crate::plugin::DtPlugin;
use crate::registry::{PluginRegistry, PluginSource};

/// The second-runtime executable, resolved via `PATH`.
pub const DEFAULT_RUNTIME: &str = "node";

const ARGS_ID: &str = "args";

/// A synthesized command node wrapping one Node.js CLI entry file.
#[derive(Debug, Clone)]
pub struct NodePluginWrapper {
    name: String,
    bin_path: PathBuf,
    description: String,
    runtime: OsString,
}

impl NodePluginWrapper {
    pub fn new(
        name: impl Into<String>,
        bin_path: impl Into<PathBuf>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            bin_path: bin_path.into(),
            description: description.into(),
            runtime: OsString::from(DEFAULT_RUNTIME),
        }
    }

    /// Override the runtime executable. Tests use this to simulate an
    /// absent runtime or substitute a stub.
    pub fn with_runtime(mut self, runtime: impl Into<OsString>) -> Self {
        self.runtime = runtime.into();
        self
    }

    pub fn bin_path(&self) -> &Path {
        &self.bin_path
    }

    /// Run `<runtime> <bin_path> [...args]`, inheriting stdio, and
    /// block until the child exits.
    fn forward(&self, args: &[OsString]) -> Result<i32> {
        debug!(
            "running node plugin '{}': {} {:?}",
            self.name,
            self.bin_path.display(),
            args
        );

        let status = process::Command::new(&self.runtime)
            .arg(&self.bin_path)
            .args(args)
            .status();

        match status {
            // A child killed by a signal has no exit code to mirror.
            Ok(status) => Ok(status.code().unwrap_or(1)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::RuntimeMissing {
                runtime: self.runtime.to_string_lossy().into_owned(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

impl DtPlugin for NodePluginWrapper {
    fn name(&self) -> &str {
        &self.name
    }

    fn command(&self) -> Command {
        // Trailing arguments are opaque passthrough: captured raw,
        // hyphens included, with no flag interpretation at this layer.
        Command::new(self.name.clone())
            .about(self.description.clone())
            .arg(
                Arg::new(ARGS_ID)
                    .help("Arguments passed through to the Node CLI")
                    .num_args(0..)
                    .value_parser(clap::value_parser!(OsString))
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true),
            )
    }

    fn run(&self, matches: &ArgMatches) -> Result<i32> {
        let args: Vec<OsString> = matches
            .get_many::<OsString>(ARGS_ID)
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        self.forward(&args)
    }
}

/// Build wrappers for the manifest's node entries and register them.
///
/// Entries of other kinds are ignored. An entry whose resolved binary
/// does not exist on disk is dropped silently (debug trace only): a
/// stale manifest must not block startup, and by policy this drop is
/// not user-audible.
pub fn load_node_plugins(
    registry: &mut PluginRegistry,
    manifest: &PluginManifest,
    repo_root: &Path,
) {
    for (name, entry) in manifest.entries() {
        if !entry.kind.is_node() {
            continue;
        }
        let Some(rel) = entry.bin.as_deref() else {
            continue;
        };

        let bin_path = repo_root.join(rel);
        if !bin_path.exists() {
            debug!(
                "node plugin '{}' binary missing at {}, skipping",
                name,
                bin_path.display()
            );
            continue;
        }

        let description = entry
            .description
            .clone()
            .unwrap_or_else(|| format!("Node plugin: {name}"));

        registry.register(
            PluginSource::Node,
            name,
            Box::new(NodePluginWrapper::new(name, bin_path, description)),
        );
    }
}
