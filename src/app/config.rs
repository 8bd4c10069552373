//! Run-configuration loading and validation.
//!
//! The configuration is a single JSON object, e.g.:
//!
//! ```json
//! {
//!   "docsRootPath": "./docs/src",
//!   "repositoryRootPath": "https://github.com/acme/widget/blob/main/docs/src",
//!   "recursive": true,
//!   "directoriesToExclude": ["node_modules", "assets"],
//!   "filesToExclude": ["SUMMARY.md"],
//!   "fileFormatsToExclude": ["png", "svg"],
//!   "onlyFileFormats": [],
//!   "onlyLanguages": ["eng", "spa"],
//!   "languagesToExclude": [],
//!   "excludeWords": ["```", "[!badge]"],
//!   "limitResultsTo": 5,
//!   "defaultTableHeader": "| File | Language |\n|---|---|\n",
//!   "tableFilenameDirectory": "./",
//!   "tableFilename": "Table.md",
//!   "sortFirstLanguage": "spa",
//!   "desiredLanguage": "spa"
//! }
//! ```
//!
//! Validation fails closed: a missing or wrongly-typed field, a 3-letter
//! code of the wrong length, or a nonexistent docs root aborts the run
//! before any traversal, and no output file is touched.

use crate::app::cli::Cli;
use crate::app::models::Config;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Raw shape of the JSON configuration file.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    docs_root_path: String,
    repository_root_path: String,
    recursive: bool,
    directories_to_exclude: Vec<String>,
    files_to_exclude: Vec<String>,
    file_formats_to_exclude: Vec<String>,
    only_file_formats: Vec<String>,
    only_languages: Vec<String>,
    languages_to_exclude: Vec<String>,
    exclude_words: Vec<String>,
    limit_results_to: i64,
    default_table_header: String,
    table_filename_directory: String,
    table_filename: String,
    sort_first_language: Option<String>,
    desired_language: Option<String>,
}

/// Locate the configuration file: explicit CLI path, then the working
/// directory, then the user-level config directory.
fn config_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.config {
        return Ok(path.clone());
    }

    let local = PathBuf::from("doclang.json");
    if local.exists() {
        return Ok(local);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let fallback = home.join(".config").join("doclang").join("config.json");
    if fallback.exists() {
        return Ok(fallback);
    }

    bail!("No configuration found: pass --config, or create ./doclang.json");
}

pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let path = config_path(cli)?;

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config at {:?}", path))?;

    let raw: RawConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config at {:?}", path))?;

    validate(raw)
}

/// Strip a leading dot and lowercase, so "MD" and ".md" match "md".
fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}

fn normalize_extensions(exts: &[String]) -> HashSet<String> {
    exts.iter().map(|e| normalize_extension(e)).collect()
}

fn check_language_code(field: &str, code: &Option<String>) -> Result<()> {
    if let Some(code) = code {
        if code.chars().count() != 3 {
            bail!(
                "Invalid config: field `{}` must be a 3-letter language code, got {:?}",
                field,
                code
            );
        }
    }
    Ok(())
}

fn validate(raw: RawConfig) -> Result<Config> {
    let docs_root = PathBuf::from(&raw.docs_root_path);
    if !docs_root.is_dir() {
        bail!(
            "Invalid config: field `docsRootPath` does not denote an existing directory: {:?}",
            raw.docs_root_path
        );
    }

    if raw.limit_results_to < -1 {
        bail!(
            "Invalid config: field `limitResultsTo` must be -1 (unbounded) or >= 0, got {}",
            raw.limit_results_to
        );
    }

    check_language_code("sortFirstLanguage", &raw.sort_first_language)?;
    check_language_code("desiredLanguage", &raw.desired_language)?;

    let only_extensions = normalize_extensions(&raw.only_file_formats);
    let exclude_extensions = if only_extensions.is_empty() {
        normalize_extensions(&raw.file_formats_to_exclude)
    } else {
        // The allowlist has priority; the exclude set is ignored.
        HashSet::new()
    };

    let exclude_languages = if raw.only_languages.is_empty() {
        raw.languages_to_exclude
    } else {
        Vec::new()
    };

    Ok(Config {
        docs_root,
        repository_root: raw.repository_root_path,
        recursive: raw.recursive,
        exclude_dirs: raw.directories_to_exclude.into_iter().collect(),
        exclude_files: raw.files_to_exclude.into_iter().collect(),
        exclude_extensions,
        only_extensions,
        only_languages: raw.only_languages,
        exclude_languages,
        exclude_words: raw.exclude_words,
        limit_results: raw.limit_results_to,
        table_header: raw.default_table_header,
        output_dir: PathBuf::from(raw.table_filename_directory),
        output_file: raw.table_filename,
        sort_first_language: raw.sort_first_language,
        desired_language: raw.desired_language,
    })
}
