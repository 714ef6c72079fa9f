use qelves_core::OperationFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawQelvesConfig {
    #[serde(default)]
    pub view: RawViewConfig,

    #[serde(default)]
    pub export: RawExportConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawViewConfig {
    pub filter: Option<OperationFilter>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawExportConfig {
    pub pretty: Option<bool>,
    pub extra_redacted_headers: Option<Vec<String>>,
    pub directory: Option<PathBuf>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QelvesConfig {
    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewConfig {
    /// Default operation filter for listings
    pub filter: OperationFilter,

    /// Default search text
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pretty-print bundles
    pub pretty: bool,

    /// Header names redacted on top of the mandatory ones
    pub extra_redacted_headers: Vec<String>,

    /// Where bundles go when no output path is given
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            extra_redacted_headers: Vec::new(),
            directory: qelves_paths::exports_dir(),
        }
    }
}
