use super::types::{
    ExportConfig, QelvesConfig, RawExportConfig, RawQelvesConfig, RawViewConfig, ViewConfig,
};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<QelvesConfig> {
        Self::load_layers(&Self::user_config_path(), &Self::project_config_path())
    }

    /// User config path (`$XDG_CONFIG_HOME/qelves/config.toml`)
    pub fn user_config_path() -> PathBuf {
        qelves_paths::config_file()
    }

    /// Both layers in merge order, labelled
    pub fn layers() -> [(&'static str, PathBuf); 2] {
        [
            ("user", Self::user_config_path()),
            ("project", Self::project_config_path()),
        ]
    }

    /// Get project config path
    /// Can be overridden with QELVES_PROJECT_CONFIG_DIR env var (useful for isolated tests)
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("QELVES_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join(qelves_paths::CONFIG_FILE)
        } else {
            Path::new(".qelves").join(qelves_paths::CONFIG_FILE)
        }
    }

    /// Merge the user layer, then the project layer, then apply defaults
    fn load_layers(user_path: &Path, project_path: &Path) -> Result<QelvesConfig> {
        let mut raw = RawQelvesConfig::default();

        for path in [user_path, project_path] {
            if let Some(layer) = Self::read_raw(path)? {
                debug!(path = %path.display(), "Loaded config layer");
                raw = Self::merge_raw(raw, layer);
            }
        }

        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<Option<RawQelvesConfig>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let raw = toml::from_str(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(Some(raw))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawQelvesConfig, overlay: RawQelvesConfig) -> RawQelvesConfig {
        RawQelvesConfig {
            view: RawViewConfig {
                filter: overlay.view.filter.or(base.view.filter),
                search: overlay.view.search.or(base.view.search),
            },
            export: RawExportConfig {
                pretty: overlay.export.pretty.or(base.export.pretty),
                extra_redacted_headers: overlay
                    .export
                    .extra_redacted_headers
                    .or(base.export.extra_redacted_headers),
                directory: overlay.export.directory.or(base.export.directory),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawQelvesConfig) -> QelvesConfig {
        let defaults = ExportConfig::default();
        QelvesConfig {
            view: ViewConfig {
                filter: raw.view.filter.unwrap_or_default(),
                search: raw.view.search.filter(|search| !search.is_empty()),
            },
            export: ExportConfig {
                pretty: raw.export.pretty.unwrap_or(defaults.pretty),
                extra_redacted_headers: raw.export.extra_redacted_headers.unwrap_or_default(),
                directory: raw.export.directory.unwrap_or(defaults.directory),
            },
        }
    }
}
