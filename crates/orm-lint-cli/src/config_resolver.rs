//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file path using a deterministic priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `orm-lint.toml` or `.orm-lint.toml` in the checked directory or one of
//!    its ancestors, stopping at the first directory holding `composer.json`
//! 3. `~/.orm-lint/config.toml` (global fallback)
//! 4. No config found → defaults

use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config` flag.
    Explicit(PathBuf),
    /// Found in the project directory or one of its ancestors.
    Project(PathBuf),
    /// Loaded from the global config directory (`~/.orm-lint/`).
    Global(PathBuf),
    /// No config found; defaults will be used.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Returns `true` if the config was loaded from the global directory.
    #[must_use]
    pub fn is_global(&self) -> bool {
        matches!(self, Self::Global(_))
    }
}

/// Project-level config file names, checked in order.
const PROJECT_CONFIG_NAMES: &[&str] = &["orm-lint.toml", ".orm-lint.toml"];

/// Marks the top of a PHP project; the upward search stops there.
const PROJECT_MARKER: &str = "composer.json";

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file path.
///
/// See module-level docs for resolution order.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Testable core: accepts `global_dir` as parameter to avoid env var races.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(project_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.exists() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

/// Searches `start` and its ancestors up to the Composer project root.
fn find_project_config(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());

    for dir in start.ancestors() {
        let found = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file());
        if found.is_some() {
            return found;
        }
        if dir.join(PROJECT_MARKER).is_file() {
            break;
        }
    }

    None
}

/// Returns the global config directory path.
///
/// Resolution: `$ORM_LINT_CONFIG_DIR` > `~/.orm-lint/`
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("ORM_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".orm-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Creates `<tmp>/app` marked as a Composer project.
    fn composer_project(tmp: &TempDir) -> PathBuf {
        let project = tmp.path().join("app");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("composer.json"), "{}").unwrap();
        project.canonicalize().unwrap()
    }

    #[test]
    fn explicit_takes_priority_over_project() {
        let tmp = TempDir::new().unwrap();
        let project = composer_project(&tmp);
        fs::write(project.join("orm-lint.toml"), "").unwrap();
        let explicit = tmp.path().join("custom.toml");

        let result = resolve_inner(&project, Some(&explicit), None);
        assert_eq!(result, ConfigSource::Explicit(explicit));
    }

    #[test]
    fn project_config_found() {
        let tmp = TempDir::new().unwrap();
        let project = composer_project(&tmp);
        fs::write(project.join("orm-lint.toml"), "").unwrap();

        let result = resolve_inner(&project, None, None);
        assert_eq!(result, ConfigSource::Project(project.join("orm-lint.toml")));
    }

    #[test]
    fn dot_config_found_and_plain_name_preferred() {
        let tmp = TempDir::new().unwrap();
        let project = composer_project(&tmp);
        fs::write(project.join(".orm-lint.toml"), "").unwrap();

        let result = resolve_inner(&project, None, None);
        assert_eq!(result, ConfigSource::Project(project.join(".orm-lint.toml")));

        fs::write(project.join("orm-lint.toml"), "").unwrap();
        let result = resolve_inner(&project, None, None);
        assert_eq!(result, ConfigSource::Project(project.join("orm-lint.toml")));
    }

    #[test]
    fn config_found_from_subdirectory() {
        let tmp = TempDir::new().unwrap();
        let project = composer_project(&tmp);
        fs::write(project.join("orm-lint.toml"), "").unwrap();
        let entities = project.join("src/Entity");
        fs::create_dir_all(&entities).unwrap();

        let result = resolve_inner(&entities, None, None);
        assert_eq!(result, ConfigSource::Project(project.join("orm-lint.toml")));
    }

    #[test]
    fn search_stops_at_composer_root() {
        let tmp = TempDir::new().unwrap();
        // Config above the Composer root belongs to another project.
        fs::write(tmp.path().join("orm-lint.toml"), "").unwrap();
        let project = composer_project(&tmp);

        let result = resolve_inner(&project, None, None);
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let tmp = TempDir::new().unwrap();
        let project = composer_project(&tmp);
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(&project, None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Global(global.path().join("config.toml")));
    }

    #[test]
    fn global_skipped_when_project_config_exists() {
        let tmp = TempDir::new().unwrap();
        let project = composer_project(&tmp);
        fs::write(project.join("orm-lint.toml"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(&project, None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn global_dir_missing_config_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let project = composer_project(&tmp);
        let global = TempDir::new().unwrap();

        let result = resolve_inner(&project, None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn config_source_paths() {
        let p = PathBuf::from("/tmp/test.toml");
        assert_eq!(ConfigSource::Explicit(p.clone()).path(), Some(p.as_path()));
        assert_eq!(ConfigSource::Project(p.clone()).path(), Some(p.as_path()));
        assert_eq!(ConfigSource::Global(p.clone()).path(), Some(p.as_path()));
        assert!(ConfigSource::Default.path().is_none());
        assert!(ConfigSource::Global(p).is_global());
        assert!(!ConfigSource::Default.is_global());
    }
}
