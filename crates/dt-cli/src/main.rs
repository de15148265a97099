//! dt - unified CLI for development tools
//!
//! The root dispatcher. Startup order is fixed: in-process plugins
//! load first, node wrappers from the manifest second, and only after
//! both complete is `argv` parsed and routed to exactly one handler.

use clap::Command;
use dt_core::{
    load_inprocess_plugins, load_node_plugins, locate, EntryPoint, Error, PluginManifest,
    PluginRegistry,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compiled-in extension points.
///
/// Linking a new in-process plugin crate means adding its loader here;
/// the dispatcher knows nothing else about the plugin.
fn entry_points() -> Vec<EntryPoint> {
    vec![("metan", dt_metan::load)]
}

fn main() {
    init_logging();
    std::process::exit(run(&entry_points()));
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(entry_points: &[EntryPoint]) -> i32 {
    let mut registry = PluginRegistry::new();

    let load_failures = load_inprocess_plugins(&mut registry, entry_points);

    let manifest_path = locate::manifest_path();
    let manifest = PluginManifest::load(&manifest_path);
    // Relative `bin` paths resolve against the manifest's directory.
    let repo_root = manifest_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    load_node_plugins(&mut registry, &manifest, &repo_root);

    tracing::debug!(
        "dt v{}: {} plugin(s) registered, {} failed, manifest {}",
        VERSION,
        registry.len(),
        load_failures.len(),
        manifest_path.display()
    );

    let mut root = registry.attach(
        Command::new("dt")
            .about("Unified CLI for development tools")
            .version(VERSION)
            .subcommand(Command::new("version").about("Show dt version"))
            .subcommand(Command::new("plugins").about("List registered plugins")),
    );

    let matches = match root.clone().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            // clap owns help/version rendering and usage errors.
            let code = e.exit_code();
            let _ = e.print();
            return code;
        }
    };

    match matches.subcommand() {
        None => {
            // Bare `dt` shows top-level help; not an error.
            let _ = root.print_help();
            0
        }
        Some(("version", _)) => {
            println!("dt version {VERSION}");
            0
        }
        Some(("plugins", _)) => {
            list_plugins(&registry);
            0
        }
        Some((name, sub)) => match registry.dispatch(name, sub) {
            Some(Ok(code)) => code,
            Some(Err(Error::RuntimeMissing { .. })) => {
                eprintln!("Error: Node.js not found. Please install Node.js.");
                1
            }
            Some(Err(e)) => {
                eprintln!("Error: {e}");
                1
            }
            // clap only accepts registered subcommands, but don't
            // panic if that invariant ever changes.
            None => {
                eprintln!("Error: no such command: {name}");
                2
            }
        },
    }
}

fn list_plugins(registry: &PluginRegistry) {
    if registry.is_empty() {
        println!("No plugins registered.");
    } else {
        println!("Registered plugins:");
        for (name, source) in registry.iter() {
            println!("  {name:<20} {source}");
        }
    }

    match which::which(dt_core::node::DEFAULT_RUNTIME) {
        Ok(path) => println!("Node runtime: {}", path.display()),
        Err(_) => println!("Node runtime: not found on PATH"),
    }
}
