//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the router is built.

use std::path::Path;

use tracing::warn;

/// Warn when the static asset directory (favicon) is missing.
pub async fn ensure_static_dir(static_dir: &str) {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(%static_dir, "static assets directory not found; /favicon.ico will 404");
    }
}

/// For file-backed SQLite URLs, create the parent directory of the database file.
/// Other URLs are left alone.
pub async fn ensure_sqlite_dir(database_url: &str) -> anyhow::Result<()> {
    let Some(path) = sqlite_file_path(database_url) else { return Ok(()) };
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

/// File path portion of a `sqlite://path?opts` URL; `None` for in-memory or non-SQLite URLs.
pub fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_path_extraction() {
        assert_eq!(sqlite_file_path("sqlite://data/valves.db?mode=rwc"), Some("data/valves.db"));
        assert_eq!(sqlite_file_path("sqlite:valves.db"), Some("valves.db"));
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/valves"), None);
    }

    #[tokio::test]
    async fn non_sqlite_url_is_noop() {
        ensure_sqlite_dir("postgres://localhost/valves").await.unwrap();
    }
}
