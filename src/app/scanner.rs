use crate::app::models::Config;
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Eligibility rules for raw traversal entries, taken from the run
/// configuration.
#[derive(Debug, Clone)]
pub struct ExclusionPolicy {
    dirs: HashSet<String>,
    files: HashSet<String>,
    extensions: HashSet<String>,
    allowed_extensions: HashSet<String>,
}

impl ExclusionPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            dirs: config.exclude_dirs.clone(),
            files: config.exclude_files.clone(),
            extensions: config.exclude_extensions.clone(),
            allowed_extensions: config.only_extensions.clone(),
        }
    }

    pub fn excludes_directory(&self, name: &str) -> bool {
        self.dirs.contains(name)
    }

    pub fn excludes_file_name(&self, basename: &str) -> bool {
        self.files.contains(basename)
    }

    pub fn excludes_extension(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }

    pub fn allows_extension(&self, ext: &str) -> bool {
        self.allowed_extensions.contains(ext)
    }

    /// Combined admission rule for a file entry. A non-empty extension
    /// allowlist admits matching files unconditionally and rejects
    /// everything else; otherwise a file passes unless its basename or
    /// extension is excluded.
    pub fn admits_file(&self, basename: &str, ext: &str) -> bool {
        if !self.allowed_extensions.is_empty() {
            return self.allows_extension(ext);
        }
        !self.excludes_file_name(basename) && !self.excludes_extension(ext)
    }
}

pub struct Scanner {
    root: PathBuf,
    recursive: bool,
    policy: ExclusionPolicy,
}

impl Scanner {
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.docs_root.clone(),
            recursive: config.recursive,
            policy: ExclusionPolicy::from_config(config),
        }
    }

    /// Enumerate eligible files under the root, in the order the
    /// filesystem yields them. Ineligible and non-regular entries are
    /// skipped with a log line; walk errors are never fatal.
    pub fn walk(&self) -> Vec<PathBuf> {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false);
        if !self.recursive {
            builder.max_depth(Some(1));
        }

        // Prune excluded directories before descending into them.
        let excluded_dirs = self.policy.dirs.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
            if is_dir && excluded_dirs.contains(entry.file_name().to_string_lossy().as_ref()) {
                log::debug!("Skipping excluded directory {:?}", entry.path());
                return false;
            }
            true
        });

        let mut files = Vec::new();
        for result in builder.build() {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            let Some(file_type) = entry.file_type() else {
                log::warn!("Skipping entry with unknown type: {:?}", entry.path());
                continue;
            };

            if file_type.is_dir() {
                // Descent (or not, in non-recursive mode) is the
                // walker's business; directories are not reported.
                continue;
            }
            if !file_type.is_file() {
                log::warn!("Skipping non-regular entry {:?}", entry.path());
                continue;
            }

            let path = entry.into_path();
            if self.admits(&path) {
                files.push(path);
            }
        }
        files
    }

    fn admits(&self, path: &Path) -> bool {
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        if self.policy.admits_file(&basename, &ext) {
            log::debug!("Including {}", self.display_path(path));
            true
        } else {
            log::warn!("Skipping {} (excluded by policy)", self.display_path(path));
            false
        }
    }

    fn display_path(&self, path: &Path) -> String {
        diff_paths(path, &self.root)
            .unwrap_or_else(|| path.to_path_buf())
            .to_string_lossy()
            .into_owned()
    }
}
