//! Plugin registry - the merged command namespace
//!
//! Both loaders append here during startup; nothing mutates the
//! registry once `argv` parsing begins. Registration order is load
//! order, and the first registration of a name wins: later ones are
//! skipped with a warning so a manifest entry cannot silently shadow
//! an in-process plugin (or vice versa).

use clap::{ArgMatches, Command};
use std::fmt;
use tracing::warn;

use crate::plugin::DtPlugin;
use crate::Result;

/// Which loader a plugin came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginSource {
    InProcess,
    Node,
}

impl fmt::Display for PluginSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProcess => write!(f, "in-process"),
            Self::Node => write!(f, "node"),
        }
    }
}

struct Registered {
    name: String,
    source: PluginSource,
    plugin: Box<dyn DtPlugin>,
}

/// Order-preserving plugin namespace.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Registered>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `plugin` under `name`. Returns `false` on a name
    /// collision; the earlier registration is kept.
    pub fn register(
        &mut self,
        source: PluginSource,
        name: impl Into<String>,
        plugin: Box<dyn DtPlugin>,
    ) -> bool {
        let name = name.into();

        if let Some(existing) = self.plugins.iter().find(|p| p.name == name) {
            warn!(
                "plugin name collision on '{}': kept {}, ignored {}",
                name, existing.source, source
            );
            eprintln!(
                "Warning: Plugin '{}' already registered ({} plugin); ignoring the {} plugin of the same name",
                name, existing.source, source
            );
            return false;
        }

        self.plugins.push(Registered {
            name,
            source,
            plugin,
        });
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name == name)
    }

    /// Source of a registered plugin.
    pub fn source(&self, name: &str) -> Option<PluginSource> {
        self.plugins
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.source)
    }

    /// `(name, source)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, PluginSource)> {
        self.plugins.iter().map(|p| (p.name.as_str(), p.source))
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Graft every registered subtree onto the root command.
    ///
    /// A plugin whose name collides with an existing root subcommand
    /// (a built-in) is skipped with a warning; built-ins always win.
    pub fn attach(&self, mut root: Command) -> Command {
        for entry in &self.plugins {
            if root
                .get_subcommands()
                .any(|cmd| cmd.get_name() == entry.name)
            {
                warn!("plugin '{}' shadows a built-in command, skipping", entry.name);
                eprintln!(
                    "Warning: Plugin '{}' conflicts with a built-in command; ignoring it",
                    entry.name
                );
                continue;
            }
            root = root.subcommand(entry.plugin.command().name(entry.name.clone()));
        }
        root
    }

    /// Route a matched subcommand to its handler. Returns `None` when
    /// no plugin is registered under `name`.
    pub fn dispatch(&self, name: &str, matches: &ArgMatches) -> Option<Result<i32>> {
        self.plugins
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.plugin.run(matches))
    }
}
