//! In-process plugin loading
//!
//! Resolves each registered entry point and grafts the resulting
//! command tree onto the registry, keyed by the entry-point name. A
//! failing entry point is reported as a warning on the error stream
//! and skipped; one bad plugin never aborts startup or prevents the
//! remaining plugins (in-process or node) from loading.

use tracing::warn;

use crate::plugin::EntryPoint;
use crate::registry::{PluginRegistry, PluginSource};

/// Resolve `entry_points` in order and register each plugin.
///
/// Returns the entry points that failed to resolve, in order, so
/// callers can inspect what the warnings reported.
pub fn load_inprocess_plugins(
    registry: &mut PluginRegistry,
    entry_points: &[EntryPoint],
) -> Vec<LoadFailure> {
    let mut failures = Vec::new();

    for (name, loader) in entry_points {
        match loader() {
            Ok(plugin) => {
                registry.register(PluginSource::InProcess, *name, plugin);
            }
            Err(error) => {
                warn!("in-process plugin '{}' failed to load: {}", name, error);
                eprintln!("Warning: Failed to load plugin '{}': {}", name, error);
                failures.push(LoadFailure { name, error });
            }
        }
    }

    failures
}

/// An entry point that failed to resolve. `name` is what the warning
/// on the error stream names.
#[derive(Debug)]
pub struct LoadFailure {
    pub name: &'static str,
    pub error: crate::Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::plugin::DtPlugin;
    use crate::Result;
    use clap::{ArgMatches, Command};

    struct NoopPlugin(&'static str);

    impl DtPlugin for NoopPlugin {
        fn name(&self) -> &str {
            self.0
        }

        fn command(&self) -> Command {
            Command::new(self.0)
        }

        fn run(&self, _matches: &ArgMatches) -> Result<i32> {
            Ok(0)
        }
    }

    fn load_good() -> Result<Box<dyn DtPlugin>> {
        Ok(Box::new(NoopPlugin("good")))
    }

    fn load_broken() -> Result<Box<dyn DtPlugin>> {
        Err(Error::plugin_load("broken", "missing shared state"))
    }

    #[test]
    fn test_loads_all_entry_points() {
        let mut registry = PluginRegistry::new();
        let failures = load_inprocess_plugins(&mut registry, &[("good", load_good)]);

        assert!(failures.is_empty());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.source("good"), Some(PluginSource::InProcess));
    }

    #[test]
    fn test_failure_does_not_stop_later_plugins() {
        let mut registry = PluginRegistry::new();
        let failures =
            load_inprocess_plugins(&mut registry, &[("broken", load_broken), ("good", load_good)]);

        // The broken plugin is skipped; the unrelated one still loads.
        assert!(!registry.contains("broken"));
        assert!(registry.contains("good"));

        // The reported failure names the plugin that broke.
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].name, "broken");
        assert!(failures[0].error.to_string().contains("missing shared state"));
    }
}
