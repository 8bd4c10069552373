use crate::app::models::{Config, Detection};
use lingua::{Language, LanguageDetector, LanguageDetectorBuilder};
use std::collections::HashSet;

/// Adapter around the statistical detection engine. Applies the
/// configured language allow/deny lists and the result limit; otherwise
/// a pure mapping from text to ranked detections.
pub struct Classifier {
    detector: LanguageDetector,
    /// Set when the engine could not be restricted directly (it needs
    /// at least two candidate languages); results are filtered to this
    /// set instead.
    post_filter: Option<Vec<Language>>,
    limit: i64,
}

impl Classifier {
    pub fn from_config(config: &Config) -> Self {
        let (detector, post_filter) = match candidate_languages(config) {
            Some(langs) if langs.len() >= 2 => (
                LanguageDetectorBuilder::from_languages(&langs).build(),
                None,
            ),
            Some(langs) if langs.len() == 1 => {
                // The engine refuses fewer than two candidates, so
                // detect across all languages and keep only the
                // configured one.
                (
                    LanguageDetectorBuilder::from_all_languages().build(),
                    Some(langs),
                )
            }
            Some(_) => {
                log::warn!(
                    "No known languages left after filtering the configured lists, \
                     detecting without restriction"
                );
                (LanguageDetectorBuilder::from_all_languages().build(), None)
            }
            None => (LanguageDetectorBuilder::from_all_languages().build(), None),
        };

        Self {
            detector,
            post_filter,
            limit: config.limit_results,
        }
    }

    /// Rank the candidate languages for `text` by descending
    /// confidence. Empty content yields an empty result, which callers
    /// treat as "undetermined", not as failure.
    pub fn classify(&self, text: &str) -> Vec<Detection> {
        if text.trim().is_empty() {
            log::error!("There is no content to determine a language from");
            return Vec::new();
        }

        let mut ranked = self.detector.compute_language_confidence_values(text);
        if let Some(allowed) = &self.post_filter {
            ranked.retain(|(lang, _)| allowed.contains(lang));
        }
        // Languages the engine saw nothing of rank at zero; dropping
        // them makes undetectable content an empty result.
        ranked.retain(|(_, confidence)| *confidence > 0.0);

        let mut detections: Vec<Detection> = ranked
            .into_iter()
            .map(|(lang, confidence)| Detection {
                code: lang.iso_code_639_3().to_string().to_lowercase(),
                confidence,
                name: None,
            })
            .collect();

        if self.limit >= 0 {
            detections.truncate(self.limit as usize);
        }
        detections
    }
}

/// Candidate languages for the detector: the resolved allowlist when
/// one is configured, otherwise the complement of the denylist, or
/// `None` for unrestricted detection.
fn candidate_languages(config: &Config) -> Option<Vec<Language>> {
    if !config.only_languages.is_empty() {
        return Some(resolve_codes(&config.only_languages));
    }
    if !config.exclude_languages.is_empty() {
        let denied: HashSet<Language> =
            resolve_codes(&config.exclude_languages).into_iter().collect();
        return Some(
            Language::all()
                .into_iter()
                .filter(|lang| !denied.contains(lang))
                .collect(),
        );
    }
    None
}

/// Map configured ISO 639-3 codes to engine languages, warning about
/// and dropping codes the engine does not know.
fn resolve_codes(codes: &[String]) -> Vec<Language> {
    codes
        .iter()
        .filter_map(|code| {
            let found = language_for_code(code);
            if found.is_none() {
                log::warn!("Unknown language code {:?} in configuration, ignoring", code);
            }
            found
        })
        .collect()
}

fn language_for_code(code: &str) -> Option<Language> {
    Language::all()
        .into_iter()
        .find(|lang| lang.iso_code_639_3().to_string().eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Config;
    use std::collections::HashSet;
    use std::path::PathBuf;

    const ENGLISH_TEXT: &str = "The quick brown fox jumps over the lazy dog. \
        Documentation should be written clearly, so that every reader can \
        understand how the project works and how to contribute to it.";

    const SPANISH_TEXT: &str = "El rápido zorro marrón salta sobre el perro \
        perezoso. La documentación debe escribirse con claridad, para que \
        cualquier lector pueda entender cómo funciona el proyecto.";

    fn classifier(only: &[&str], exclude: &[&str], limit: i64) -> Classifier {
        Classifier::from_config(&config_for(only, exclude, limit))
    }

    fn config_for(only: &[&str], exclude: &[&str], limit: i64) -> Config {
        Config {
            docs_root: PathBuf::from("."),
            repository_root: String::new(),
            recursive: true,
            exclude_dirs: HashSet::new(),
            exclude_files: HashSet::new(),
            exclude_extensions: HashSet::new(),
            only_extensions: HashSet::new(),
            only_languages: only.iter().map(|s| s.to_string()).collect(),
            exclude_languages: exclude.iter().map(|s| s.to_string()).collect(),
            exclude_words: Vec::new(),
            limit_results: limit,
            table_header: String::new(),
            output_dir: PathBuf::from("."),
            output_file: "Table.md".to_string(),
            sort_first_language: None,
            desired_language: None,
        }
    }

    #[test]
    fn test_empty_text_is_undetermined() {
        let classifier = classifier(&["eng", "spa"], &[], -1);
        assert!(classifier.classify("").is_empty());
        assert!(classifier.classify("   \n\t").is_empty());
    }

    #[test]
    fn test_allowlist_with_limit_picks_english() {
        let classifier = classifier(&["eng", "spa"], &[], 1);
        let detections = classifier.classify(ENGLISH_TEXT);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].code, "eng");
        assert!(detections[0].confidence > 0.0);
    }

    #[test]
    fn test_allowlist_restricts_candidates() {
        let classifier = classifier(&["eng", "spa"], &[], -1);
        for detection in classifier.classify(SPANISH_TEXT) {
            assert!(detection.code == "eng" || detection.code == "spa");
        }
    }

    #[test]
    fn test_results_are_ordered_by_descending_confidence() {
        let classifier = classifier(&["eng", "spa", "fra", "deu"], &[], -1);
        let detections = classifier.classify(SPANISH_TEXT);
        assert!(!detections.is_empty());
        assert_eq!(detections[0].code, "spa");
        for pair in detections.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_limit_truncates_to_top_entries() {
        let unlimited = classifier(&["eng", "spa", "fra", "deu"], &[], -1);
        let limited = classifier(&["eng", "spa", "fra", "deu"], &[], 2);

        let full = unlimited.classify(ENGLISH_TEXT);
        let cut = limited.classify(ENGLISH_TEXT);

        assert!(cut.len() <= 2);
        let top_codes: Vec<&str> = full.iter().take(cut.len()).map(|d| d.code.as_str()).collect();
        let cut_codes: Vec<&str> = cut.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(cut_codes, top_codes);
    }

    #[test]
    fn test_denylist_builds_the_complement() {
        let config = config_for(&[], &["spa", "fra"], -1);
        let candidates = candidate_languages(&config).unwrap();
        assert!(!candidates.contains(&Language::Spanish));
        assert!(!candidates.contains(&Language::French));
        assert!(candidates.contains(&Language::English));
        assert_eq!(candidates.len(), Language::all().len() - 2);
    }

    #[test]
    fn test_allowlist_takes_priority_in_candidates() {
        let config = config_for(&["eng", "spa"], &["fra"], -1);
        let candidates = candidate_languages(&config).unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.contains(&Language::English));
        assert!(candidates.contains(&Language::Spanish));
    }

    #[test]
    fn test_unrestricted_when_no_lists_configured() {
        let config = config_for(&[], &[], -1);
        assert!(candidate_languages(&config).is_none());
    }

    #[test]
    fn test_unknown_configured_codes_are_dropped() {
        let classifier = classifier(&["zzz", "eng", "spa"], &[], 1);
        let detections = classifier.classify(ENGLISH_TEXT);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].code, "eng");
    }
}
