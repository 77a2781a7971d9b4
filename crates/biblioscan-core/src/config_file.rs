use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub summarizer: Option<SummarizerConfig>,
    pub ocr: Option<OcrConfig>,
    pub export: Option<ExportConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizerConfig {
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub api_token: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language code(s), e.g. "eng" or "eng+deu".
    pub language: Option<String>,
    /// Directory containing `*.traineddata` files.
    pub tessdata_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Base name (without extension) for exported files.
    pub file_name: Option<String>,
}

/// Platform config directory path: `<config_dir>/biblioscan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("biblioscan").join("config.toml"))
}

/// Load config by cascading CWD `.biblioscan.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".biblioscan.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let bs = base.summarizer.unwrap_or_default();
    let os = overlay.summarizer.unwrap_or_default();
    let bo = base.ocr.unwrap_or_default();
    let oo = overlay.ocr.unwrap_or_default();
    let be = base.export.unwrap_or_default();
    let oe = overlay.export.unwrap_or_default();

    ConfigFile {
        summarizer: Some(SummarizerConfig {
            model: os.model.or(bs.model),
            endpoint: os.endpoint.or(bs.endpoint),
            api_token: os.api_token.or(bs.api_token),
            min_length: os.min_length.or(bs.min_length),
            max_length: os.max_length.or(bs.max_length),
            timeout_secs: os.timeout_secs.or(bs.timeout_secs),
        }),
        ocr: Some(OcrConfig {
            language: oo.language.or(bo.language),
            tessdata_path: oo.tessdata_path.or(bo.tessdata_path),
        }),
        export: Some(ExportConfig {
            file_name: oe.file_name.or(be.file_name),
        }),
    }
}

/// Write `config` as pretty TOML, creating parent directories as needed.
pub fn save_to_path(config: &ConfigFile, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(path, content).map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(())
}
