use anyhow::{Context, Result};
use regex::Regex;
use std::borrow::Cow;

/// Removes configured boilerplate phrases (license headers, badge
/// markup, code fences) from file content before language detection,
/// so repeated markup does not bias the classifier.
pub struct Preprocessor {
    pattern: Option<Regex>,
}

impl Preprocessor {
    /// Compile the phrase list into a single alternation. Phrases are
    /// escaped and match literally; regex metacharacters in the
    /// configuration carry no special meaning.
    pub fn from_phrases(phrases: &[String]) -> Result<Self> {
        let literals: Vec<String> = phrases
            .iter()
            .filter(|p| {
                if p.is_empty() {
                    log::warn!("Ignoring empty entry in excludeWords");
                }
                !p.is_empty()
            })
            .map(|p| regex::escape(p))
            .collect();

        if literals.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = Regex::new(&literals.join("|"))
            .context("Failed to compile excludeWords pattern")?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Remove every non-overlapping occurrence of the configured
    /// phrases. With no phrases configured the text passes through
    /// unchanged.
    pub fn strip<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(re) => re.replace_all(text, ""),
            None => Cow::Borrowed(text),
        }
    }
}
