//! Platform-specific directory utilities.

use std::path::PathBuf;

/// Platform-specific log directory for the tower client.
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/tower/logs`
/// - Linux: `~/.cache/tower/logs` (or `$XDG_CACHE_HOME/tower/logs`)
/// - Windows: `%LOCALAPPDATA%\tower\cache\logs`
/// - Fallback: `/tmp/tower/logs`
pub fn log_dir() -> PathBuf {
    let base_dir = directories::ProjectDirs::from("", "", "tower")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/tower"));

    base_dir.join("logs")
}
