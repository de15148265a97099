//! dt-core: plugin resolution and dispatch for the `dt` CLI
//!
//! `dt` aggregates independently-developed sub-tools into one command
//! surface. This crate owns everything between `argv` and the plugin
//! that handles it:
//!
//! - `locate`: find the repository root and the `dt-plugins.yaml`
//!   manifest by walking up from the installed binary
//! - `manifest`: fail-open parsing of the plugin manifest
//! - `plugin`: the `DtPlugin` trait in-process plugins implement
//! - `inprocess`: entry-point resolution with per-plugin failure
//!   isolation
//! - `node`: synthesized wrappers that forward to Node.js CLIs as
//!   child processes
//! - `registry`: the merged command namespace and dispatcher
//!
//! Plugins come from two sources and meet in one namespace:
//!
//! ```text
//! entry points ──▶ load_inprocess_plugins ──┐
//!                                           ├──▶ PluginRegistry ──▶ clap root ──▶ dispatch
//! dt-plugins.yaml ──▶ load_node_plugins ────┘
//! ```
//!
//! Both loaders run to completion before `argv` is parsed; exactly one
//! handler runs per invocation and its exit code becomes the process
//! exit code.

pub mod error;
pub mod inprocess;
pub mod locate;
pub mod manifest;
pub mod node;
pub mod plugin;
pub mod registry;

pub use error::{Error, Result};
pub use inprocess::{load_inprocess_plugins, LoadFailure};
pub use manifest::{ManifestEntry, PluginKind, PluginManifest};
pub use node::{load_node_plugins, NodePluginWrapper};
pub use plugin::{DtPlugin, EntryPoint, PluginLoader};
pub use registry::{PluginRegistry, PluginSource};
