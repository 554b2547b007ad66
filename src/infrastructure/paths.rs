//! Path resolution for log and configuration files.
//!
//! Handles tilde expansion and the platform data directory lookup used to
//! place the rotating log file.

use crate::Config;
use std::path::PathBuf;

/// Directory name used under the platform data directory.
pub const APP_DIR_NAME: &str = "datagrid";

/// Returns the directory that holds the log file.
///
/// Resolution order:
/// 1. `config.log_dir`, tilde-expanded
/// 2. The platform local data directory joined with `datagrid`
///    (`~/.local/share/datagrid` on Linux)
/// 3. `./.datagrid` when no data directory can be determined
///
/// # Examples
///
/// ```
/// use datagrid::infrastructure::data_dir;
/// use datagrid::Config;
///
/// let config = Config {
///     log_dir: Some("/tmp/datagrid-logs".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(data_dir(&config).to_str(), Some("/tmp/datagrid-logs"));
/// ```
#[must_use]
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(dir) = config.log_dir.as_deref() {
        return expand_tilde(dir);
    }

    dirs::data_local_dir().map_or_else(
        || PathBuf::from(".").join(format!(".{APP_DIR_NAME}")),
        |dir| dir.join(APP_DIR_NAME),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, and tilde paths when the home directory is
/// unknown, are returned unchanged.
///
/// # Examples
///
/// ```
/// use datagrid::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// if let Some(home) = dirs::home_dir() {
///     assert_eq!(expand_tilde("~/rows.json"), home.join("rows.json"));
/// }
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_log_dir_wins() {
        let config = Config {
            log_dir: Some("/var/log/grid".to_string()),
            ..Config::default()
        };
        assert_eq!(data_dir(&config), PathBuf::from("/var/log/grid"));
    }

    #[test]
    fn default_dir_ends_with_app_name() {
        let dir = data_dir(&Config::default());
        assert!(dir.ends_with(APP_DIR_NAME) || dir.ends_with(".datagrid"));
    }

    #[test]
    fn tilde_only_expands_at_the_start() {
        assert_eq!(expand_tilde("a/~/b"), PathBuf::from("a/~/b"));
        assert_eq!(expand_tilde("~user"), PathBuf::from("~user"));
    }
}
