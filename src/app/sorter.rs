use crate::app::models::FileRecord;
use crate::app::names;

/// Promote records whose top detected language matches the preferred
/// code to the front of the list. The partition is stable: relative
/// order inside both groups is preserved. With no preferred code the
/// list passes through untouched.
pub fn sort_by_language(
    records: Vec<FileRecord>,
    preferred_code: Option<&str>,
) -> Vec<FileRecord> {
    let Some(code) = preferred_code else {
        return records;
    };
    if records.is_empty() {
        log::error!("There are no records to sort");
        return records;
    }
    let Some(preferred_name) = names::resolve_one(code) else {
        log::warn!(
            "Cannot resolve sort language {:?}, leaving record order unchanged",
            code
        );
        return records;
    };

    let (mut promoted, rest): (Vec<FileRecord>, Vec<FileRecord>) =
        records.into_iter().partition(|record| {
            record
                .top_name()
                .map_or(false, |name| name.contains(preferred_name))
        });
    promoted.extend(rest);
    promoted
}
