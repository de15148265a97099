//! Plugin interface
//!
//! Every plugin, regardless of execution strategy, contributes one
//! subcommand tree to the root dispatcher and handles its own matched
//! invocation. In-process plugins implement [`DtPlugin`] directly;
//! Node.js plugins get a synthesized implementation
//! ([`crate::NodePluginWrapper`]).

use clap::{ArgMatches, Command};

use crate::Result;

/// A sub-tool mounted under the root command.
pub trait DtPlugin {
    /// Default name the plugin registers under. The registry may mount
    /// it under a different name (the entry-point name wins).
    fn name(&self) -> &str;

    /// The plugin's command tree, grafted verbatim under the root.
    /// Argument handling inside the subtree is entirely the plugin's.
    fn command(&self) -> Command;

    /// Handle a matched invocation. `matches` are the matches for this
    /// plugin's subtree. Returns the process exit code.
    fn run(&self, matches: &ArgMatches) -> Result<i32>;
}

/// Constructor for an in-process plugin.
///
/// This is the loadable side of an entry point: resolution may fail,
/// and a failure must never take down the host or the other plugins.
pub type PluginLoader = fn() -> Result<Box<dyn DtPlugin>>;

/// A registered extension point: `(command name, loader)`.
///
/// The list of entry points is compiled into the binary; linking a new
/// plugin crate means adding one pair. This is the closest Rust
/// analogue of a package-metadata entry-point group: discovery by
/// well-known registration key, without the dispatcher knowing the
/// plugin's identity.
pub type EntryPoint = (&'static str, PluginLoader);
