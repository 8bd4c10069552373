use crate::app::models::FileRecord;

/// Display name for an ISO 639-3 code, from the registry.
pub fn resolve_one(code: &str) -> Option<&'static str> {
    isolang::Language::from_639_3(&code.to_ascii_lowercase()).map(|lang| lang.to_name())
}

/// Populate the display name of every detection. Unknown codes are
/// warned about and left unresolved; rendering shows a placeholder for
/// them. Returns new records rather than touching the input in place.
pub fn resolve_names(records: Vec<FileRecord>) -> Vec<FileRecord> {
    records
        .into_iter()
        .map(|record| {
            let detections = record
                .detections
                .into_iter()
                .map(|mut detection| {
                    match resolve_one(&detection.code) {
                        Some(name) => detection.name = Some(name.to_string()),
                        None => {
                            log::warn!(
                                "No display name for language code {:?}",
                                detection.code
                            );
                        }
                    }
                    detection
                })
                .collect();
            FileRecord {
                detections,
                ..record
            }
        })
        .collect()
}
