use std::collections::HashSet;
use std::path::PathBuf;

/// Validated run configuration, built once and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the documentation tree to analyze.
    pub docs_root: PathBuf,
    /// Prefix substituted for `docs_root` when building report links.
    pub repository_root: String,
    pub recursive: bool,
    pub exclude_dirs: HashSet<String>,
    pub exclude_files: HashSet<String>,
    /// Normalized (lowercase, no leading dot) extensions to skip.
    pub exclude_extensions: HashSet<String>,
    /// Normalized extensions admitted unconditionally. When non-empty,
    /// `exclude_extensions` is empty.
    pub only_extensions: HashSet<String>,
    /// ISO 639-3 codes the detector is restricted to. When non-empty,
    /// `exclude_languages` is empty.
    pub only_languages: Vec<String>,
    pub exclude_languages: Vec<String>,
    /// Boilerplate phrases stripped from file content before detection.
    pub exclude_words: Vec<String>,
    /// Keep at most this many detections per file; -1 keeps all.
    pub limit_results: i64,
    pub table_header: String,
    pub output_dir: PathBuf,
    pub output_file: String,
    pub sort_first_language: Option<String>,
    pub desired_language: Option<String>,
}

/// One detected language for a file.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// ISO 639-3 code reported by the detection engine.
    pub code: String,
    /// Engine confidence in [0, 1].
    pub confidence: f64,
    /// Display name, populated by the name resolver. `None` until
    /// resolution, or when the code is unknown to the registry.
    pub name: Option<String>,
}

/// A file discovered during the walk, together with its detections
/// ordered by descending confidence.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub detections: Vec<Detection>,
}

impl FileRecord {
    /// Display name of the highest-confidence detection, if resolved.
    pub fn top_name(&self) -> Option<&str> {
        self.detections.first().and_then(|d| d.name.as_deref())
    }
}
