//! `examlens.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use examlens_core::model::UNKNOWN_LABEL;

/// Top-level examlens configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamlensConfig {
    /// `db.json` snapshot, or a bare array of submissions.
    #[serde(default)]
    pub source: Option<PathBuf>,
    /// Separate exam-window file, when not part of `source`.
    #[serde(default)]
    pub exams: Option<PathBuf>,
    /// Student scope. Unset means administrator scope.
    #[serde(default)]
    pub viewer_user_id: Option<String>,
    /// Display value for missing names and titles.
    #[serde(default = "default_unknown_label")]
    pub unknown_label: String,
    /// Directory `export` writes to when no `--output` is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Column ids in order. Empty means the default column set.
    #[serde(default)]
    pub columns: Vec<String>,
}

fn default_unknown_label() -> String {
    UNKNOWN_LABEL.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./examlens-out")
}

impl Default for ExamlensConfig {
    fn default() -> Self {
        Self {
            source: None,
            exams: None,
            viewer_user_id: None,
            unknown_label: default_unknown_label(),
            output_dir: default_output_dir(),
            export: ExportConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Unset variables expand to the empty string. Expanded values are not
/// scanned again.
pub fn resolve_env_vars(s: &str) -> String {
    resolve_with(s, |name| std::env::var(name).ok())
}

fn resolve_with(s: &str, var: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&var(&rest[start + 2..start + end]).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

impl ExamlensConfig {
    fn resolve_env(mut self) -> Self {
        self.source = self.source.as_deref().map(resolve_path);
        self.exams = self.exams.as_deref().map(resolve_path);
        self.viewer_user_id = self
            .viewer_user_id
            .as_deref()
            .map(resolve_env_vars)
            .filter(|v| !v.trim().is_empty());
        self.unknown_label = resolve_env_vars(&self.unknown_label);
        self.output_dir = resolve_path(&self.output_dir);
        self.export.columns = self
            .export
            .columns
            .iter()
            .map(|c| resolve_env_vars(c))
            .collect();
        self
    }

    /// Apply `EXAMLENS_VIEWER` and `EXAMLENS_SOURCE`, looked up through `var`.
    fn apply_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(viewer) = var("EXAMLENS_VIEWER").filter(|v| !v.trim().is_empty()) {
            self.viewer_user_id = Some(viewer);
        }
        if let Some(source) = var("EXAMLENS_SOURCE").filter(|v| !v.trim().is_empty()) {
            self.source = Some(PathBuf::from(source));
        }
        self
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `examlens.toml` in the current directory
/// 2. `~/.config/examlens/config.toml`
///
/// Environment variable overrides: `EXAMLENS_VIEWER`, `EXAMLENS_SOURCE`.
pub fn load_config() -> Result<ExamlensConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<ExamlensConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("examlens.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<ExamlensConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => ExamlensConfig::default(),
    };

    Ok(config
        .resolve_env()
        .apply_overrides(|name| std::env::var(name).ok()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("examlens"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_EXAMLENS_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_EXAMLENS_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_EXAMLENS_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_EXAMLENS_TEST_VAR");
    }

    #[test]
    fn expanded_values_are_not_rescanned() {
        let var = |name: &str| match name {
            "SELF" => Some("${SELF}".to_string()),
            "OTHER" => Some("${SELF}!".to_string()),
            _ => None,
        };
        assert_eq!(resolve_with("${SELF}", var), "${SELF}");
        assert_eq!(resolve_with("a${OTHER}b${SELF}", var), "a${SELF}!b${SELF}");
        assert_eq!(resolve_with("${MISSING}-${SELF", var), "-${SELF");
    }

    #[test]
    fn self_referencing_variable_loads() {
        std::env::set_var("_EXAMLENS_TEST_SELF", "${_EXAMLENS_TEST_SELF}");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examlens.toml");
        std::fs::write(&path, "unknown_label = \"${_EXAMLENS_TEST_SELF}\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        std::env::remove_var("_EXAMLENS_TEST_SELF");
        assert_eq!(config.unknown_label, "${_EXAMLENS_TEST_SELF}");
    }

    #[test]
    fn default_config() {
        let config = ExamlensConfig::default();
        assert_eq!(config.unknown_label, "Unknown");
        assert!(config.viewer_user_id.is_none());
        assert!(config.export.columns.is_empty());
        assert_eq!(config.output_dir, PathBuf::from("./examlens-out"));
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
source = "data/db.json"
exams = "data/exams.json"
viewer_user_id = "42"
unknown_label = "N/A"
output_dir = "out"

[export]
columns = ["student_name", "score", "status"]
"#;
        let config: ExamlensConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.source, Some(PathBuf::from("data/db.json")));
        assert_eq!(config.viewer_user_id.as_deref(), Some("42"));
        assert_eq!(config.unknown_label, "N/A");
        assert_eq!(config.export.columns.len(), 3);
    }

    #[test]
    fn load_from_explicit_path() {
        std::env::set_var("_EXAMLENS_TEST_DATA_DIR", "/srv/exams");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("examlens.toml");
        std::fs::write(&path, "source = \"${_EXAMLENS_TEST_DATA_DIR}/db.json\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        std::env::remove_var("_EXAMLENS_TEST_DATA_DIR");

        // EXAMLENS_SOURCE is not set in the test environment.
        if std::env::var("EXAMLENS_SOURCE").is_err() {
            assert_eq!(config.source, Some(PathBuf::from("/srv/exams/db.json")));
        }
        assert_eq!(config.unknown_label, "Unknown");
    }

    #[test]
    fn missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn invalid_toml_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "source = [").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn overrides_win_over_file() {
        let config = ExamlensConfig {
            viewer_user_id: Some("from-file".into()),
            ..ExamlensConfig::default()
        };
        let overridden = config.clone().apply_overrides(|name| match name {
            "EXAMLENS_VIEWER" => Some("7".into()),
            "EXAMLENS_SOURCE" => Some("/tmp/db.json".into()),
            _ => None,
        });
        assert_eq!(overridden.viewer_user_id.as_deref(), Some("7"));
        assert_eq!(overridden.source, Some(PathBuf::from("/tmp/db.json")));

        let untouched = config.apply_overrides(|_| Some("  ".into()));
        assert_eq!(untouched.viewer_user_id.as_deref(), Some("from-file"));
    }

    #[test]
    fn blank_viewer_means_admin_scope() {
        let config = ExamlensConfig {
            viewer_user_id: Some("${_EXAMLENS_UNSET_VIEWER_VAR}".into()),
            ..ExamlensConfig::default()
        };
        assert!(config.resolve_env().viewer_user_id.is_none());
    }
}
