//! Resolution of runtime settings: CLI flags > env vars > config file > defaults.

use std::path::Path;
use std::time::Duration;

use biblioscan_core::SummaryBounds;
use biblioscan_core::config_file::{self, ConfigFile, ExportConfig, OcrConfig, SummarizerConfig};
use biblioscan_core::model::huggingface::{DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use biblioscan_ingest::OcrSettings;

/// Summarization flags as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct SummarizeFlags {
    pub model: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizerSettings {
    pub model: String,
    pub endpoint: String,
    pub api_token: Option<String>,
    pub bounds: SummaryBounds,
    pub timeout: Duration,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn resolve_summarizer(
    flags: &SummarizeFlags,
    config: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> SummarizerSettings {
    let file = config.summarizer.clone().unwrap_or_default();
    let defaults = SummaryBounds::default();

    SummarizerSettings {
        model: non_blank(flags.model.clone())
            .or_else(|| non_blank(env("BIBLIOSCAN_SUMMARY_MODEL")))
            .or_else(|| non_blank(file.model))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        endpoint: non_blank(file.endpoint).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        api_token: non_blank(env("HF_API_TOKEN")).or_else(|| non_blank(file.api_token)),
        bounds: SummaryBounds::new(
            flags
                .min_length
                .or(file.min_length)
                .unwrap_or(defaults.min_length),
            flags
                .max_length
                .or(file.max_length)
                .unwrap_or(defaults.max_length),
        ),
        timeout: file
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT),
    }
}

pub fn resolve_ocr(config: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> OcrSettings {
    let file = config.ocr.clone().unwrap_or_default();
    OcrSettings {
        language: non_blank(file.language),
        tessdata_path: non_blank(env("TESSDATA_PREFIX")).or_else(|| non_blank(file.tessdata_path)),
    }
}

/// Config with every field set to the value a run would use right now.
///
/// The API token is left out so it never lands in a file by accident.
pub fn effective_config(config: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> ConfigFile {
    let summarizer = resolve_summarizer(&SummarizeFlags::default(), config, &env);
    let ocr = resolve_ocr(config, &env);
    let file_name = config
        .export
        .as_ref()
        .and_then(|e| non_blank(e.file_name.clone()))
        .unwrap_or_else(|| biblioscan_export::DEFAULT_FILE_NAME.to_string());

    ConfigFile {
        summarizer: Some(SummarizerConfig {
            model: Some(summarizer.model),
            endpoint: Some(summarizer.endpoint),
            api_token: None,
            min_length: Some(summarizer.bounds.min_length),
            max_length: Some(summarizer.bounds.max_length),
            timeout_secs: Some(summarizer.timeout.as_secs()),
        }),
        ocr: Some(OcrConfig {
            language: Some(
                ocr.language
                    .unwrap_or_else(|| biblioscan_ingest::DEFAULT_OCR_LANGUAGE.to_string()),
            ),
            tessdata_path: ocr.tessdata_path,
        }),
        export: Some(ExportConfig {
            file_name: Some(file_name),
        }),
    }
}

/// Write `config` to `path`, refusing to replace an existing file unless `force`.
pub fn write_config(path: &Path, config: &ConfigFile, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Re-run with --force to overwrite it.",
            path.display()
        );
    }
    config_file::save_to_path(config, path).map_err(|e| anyhow::anyhow!(e))
}
