//! Repository root and manifest discovery
//!
//! `dt` ships inside a monorepo; the plugin manifest lives at the repo
//! root. Discovery walks ancestor directories of the installed binary,
//! closest first, stopping at the first directory that either contains
//! the manifest itself or looks like the monorepo root (a `Cargo.toml`
//! next to a `pnpm-workspace.yaml`).
//!
//! Discovery never fails: when no marker matches before the filesystem
//! root, it falls back to a fixed ancestor depth. That fallback is a
//! best-effort default and the returned path may not exist.

use std::path::{Path, PathBuf};

/// Manifest file name, looked up at the repository root.
pub const MANIFEST_FILE: &str = "dt-plugins.yaml";

/// Environment override for the manifest location. When set, marker
/// discovery is skipped entirely and `bin` paths resolve relative to
/// the override's parent directory.
pub const MANIFEST_ENV: &str = "DT_PLUGINS";

// Ancestor depth used when no marker is found. Matches the layout
// cli/<tool>/target/<profile>/dt relative to the repo root.
const FALLBACK_DEPTH: usize = 5;

/// Find the repository root by walking up from the installed binary.
///
/// Always returns a path, possibly nonexistent.
pub fn repo_root() -> PathBuf {
    let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
    let exe = exe.canonicalize().unwrap_or(exe);
    repo_root_from(&exe)
}

/// Marker walk starting from an explicit location (the binary path in
/// production; a synthetic tree in tests).
pub fn repo_root_from(start: &Path) -> PathBuf {
    for parent in start.ancestors().skip(1) {
        if parent.join(MANIFEST_FILE).exists() {
            return parent.to_path_buf();
        }
        if parent.join("Cargo.toml").exists() && parent.join("pnpm-workspace.yaml").exists() {
            return parent.to_path_buf();
        }
    }

    // No marker before the filesystem root: assume a fixed depth.
    start
        .ancestors()
        .nth(FALLBACK_DEPTH)
        .unwrap_or_else(|| Path::new("/"))
        .to_path_buf()
}

/// Path to `dt-plugins.yaml`. No existence check is performed here;
/// absence is handled (silently) by the manifest parser.
pub fn manifest_path() -> PathBuf {
    if let Some(path) = std::env::var_os(MANIFEST_ENV) {
        return PathBuf::from(path);
    }
    repo_root().join(MANIFEST_FILE)
}

/// Manifest path under an explicit root.
pub fn manifest_path_from(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}
