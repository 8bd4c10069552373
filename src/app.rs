// Declare modules
pub mod classifier;
pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod names;
pub mod preprocess;
pub mod scanner;
pub mod sorter;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;

use self::classifier::Classifier;
use self::cli::Cli;
use self::config::resolve_config;
use self::models::{Config, FileRecord};
use self::preprocess::Preprocessor;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse args and resolve the run configuration.
    let args = Cli::parse();
    let config = resolve_config(&args)?;

    execute(&config)
}

/// Run the full pipeline for one configuration. Configuration is a
/// value, so several runs with different settings can share a process.
pub fn execute(config: &Config) -> Result<()> {
    // 2. Walk the documentation tree.
    let scanner = Scanner::new(config);
    let paths = scanner.walk();
    if paths.is_empty() {
        log::error!("No files found under {:?}", config.docs_root);
        return Ok(());
    }

    // 3. Read, scrub and classify each file in turn.
    let preprocessor = Preprocessor::from_phrases(&config.exclude_words)?;
    let classifier = Classifier::from_config(config);
    let mut records = Vec::new();
    for path in paths {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!("Skipping unreadable file {:?}: {}", path, err);
                continue;
            }
        };
        let detections = classifier.classify(&preprocessor.strip(&content));
        log::debug!(
            "Classified {:?}: {} candidate language(s)",
            path,
            detections.len()
        );
        records.push(FileRecord { path, detections });
    }

    // 4. Resolve display names and order the results.
    let records = names::resolve_names(records);
    let records = sorter::sort_by_language(records, config.sort_first_language.as_deref());

    // 5. Render and write the report. An empty run produces no file.
    let Some(table) = formatter::format(&records, config) else {
        return Ok(());
    };

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", config.output_dir))?;
    let output_path = config.output_dir.join(&config.output_file);
    fs::write(&output_path, table)
        .with_context(|| format!("Failed to write report to {:?}", output_path))?;
    log::info!("Wrote language table to {:?}", output_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::Path;

    const ENGLISH_TEXT: &str = "This guide explains how to install the tool, \
        configure it for your repository, and read the generated report. Each \
        section contains examples you can copy into your own project.";

    const SPANISH_TEXT: &str = "Esta guía explica cómo instalar la herramienta, \
        configurarla para tu repositorio y leer el informe generado. Cada \
        sección contiene ejemplos que puedes copiar en tu propio proyecto.";

    fn test_config(docs_root: &Path, output_dir: &Path) -> Config {
        Config {
            docs_root: docs_root.to_path_buf(),
            repository_root: "https://example.com/repo/docs".to_string(),
            recursive: true,
            exclude_dirs: HashSet::new(),
            exclude_files: HashSet::new(),
            exclude_extensions: HashSet::new(),
            only_extensions: HashSet::new(),
            only_languages: vec!["eng".to_string(), "spa".to_string()],
            exclude_languages: Vec::new(),
            exclude_words: Vec::new(),
            limit_results: 1,
            table_header: "| File | Language |\n|---|---|\n".to_string(),
            output_dir: output_dir.to_path_buf(),
            output_file: "Table.md".to_string(),
            sort_first_language: Some("spa".to_string()),
            desired_language: Some("spa".to_string()),
        }
    }

    #[test]
    fn test_pipeline_writes_annotated_table() {
        let docs = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(docs.path().join("english.md"), ENGLISH_TEXT).unwrap();
        fs::write(docs.path().join("spanish.md"), SPANISH_TEXT).unwrap();

        let config = test_config(docs.path(), out.path());
        execute(&config).unwrap();

        let table = fs::read_to_string(out.path().join("Table.md")).unwrap();
        assert!(table.starts_with("| File | Language |\n|---|---|\n"));
        assert!(table.contains("|Spanish ✅|"));
        assert!(table.contains("|English ❌|"));
        // The preferred language comes first.
        let spanish_row = table.find("spanish.md").unwrap();
        let english_row = table.find("english.md").unwrap();
        assert!(spanish_row < english_row);
        // Links carry the repository prefix.
        assert!(table.contains("(https://example.com/repo/docs/"));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let docs = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        fs::write(docs.path().join("english.md"), ENGLISH_TEXT).unwrap();
        fs::write(docs.path().join("spanish.md"), SPANISH_TEXT).unwrap();

        let config = test_config(docs.path(), out.path());
        execute(&config).unwrap();
        let first = fs::read(out.path().join("Table.md")).unwrap();
        execute(&config).unwrap();
        let second = fs::read(out.path().join("Table.md")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_tree_writes_no_report() {
        let docs = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();

        let config = test_config(docs.path(), out.path());
        execute(&config).unwrap();

        assert!(!out.path().join("Table.md").exists());
    }
}
