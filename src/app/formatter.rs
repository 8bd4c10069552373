use crate::app::models::{Config, FileRecord};
use crate::app::names;
use std::path::Path;

const PASS_MARKER: &str = "✅";
const FAIL_MARKER: &str = "❌";

/// Shown when a file's top language could not be detected or its code
/// has no display name.
const UNRESOLVED: &str = "unknown";

/// Render the records into the final Markdown table: the configured
/// header verbatim, then one row per record in the given order. Returns
/// `None` for an empty record list; callers must not write output in
/// that case.
pub fn format(records: &[FileRecord], config: &Config) -> Option<String> {
    if records.is_empty() {
        log::error!("There are no records to format, refusing to emit an empty table");
        return None;
    }

    let desired_name = config.desired_language.as_deref().and_then(|code| {
        let name = names::resolve_one(code);
        if name.is_none() {
            log::warn!(
                "Cannot resolve desired language {:?}, skipping row annotations",
                code
            );
        }
        name
    });

    let mut table = config.table_header.clone();
    for record in records {
        table.push_str(&render_row(record, config, desired_name));
    }
    Some(table)
}

fn render_row(record: &FileRecord, config: &Config, desired_name: Option<&str>) -> String {
    let basename = record
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let link = link_path(&record.path, config);
    let top = record.top_name().unwrap_or(UNRESOLVED);

    let annotation = match desired_name {
        Some(want) if top == want => format!(" {}", PASS_MARKER),
        Some(_) => format!(" {}", FAIL_MARKER),
        None => String::new(),
    };

    format!("|[{}]({})|{}{}|\n", basename, link, top, annotation)
}

/// Rewrite the docs-root prefix of `path` to the repository root. A
/// literal string substitution: when the root is not a prefix of the
/// path, the path is passed through unchanged.
fn link_path(path: &Path, config: &Config) -> String {
    let path = path.to_string_lossy();
    let root = config.docs_root.to_string_lossy();
    match path.strip_prefix(root.as_ref()) {
        Some(rest) => format!("{}{}", config.repository_root, rest),
        None => path.into_owned(),
    }
}
