//! Norwegian → English dictionary lookups.
//!
//! The coordinator only sees the [`Dictionary`] trait; [`LexinClient`] is
//! the production implementation.

pub mod lexin;

use std::fmt::Write as _;

pub use lexin::LexinClient;

/// Shown when a lookup produced nothing usable.
const NO_RESULTS: &str = "No results found";

/// One dictionary hit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Translation {
    /// Norwegian headword.
    pub source_text: String,
    /// English headword.
    pub target_text: String,
    pub part_of_speech: String,
    pub definition: String,
}

impl Translation {
    /// `hus (noun) → house`; the part of speech is omitted when unknown.
    pub fn format_short(&self) -> String {
        let mut line = self.source_text.clone();
        if !self.part_of_speech.is_empty() {
            let _ = write!(line, " ({})", self.part_of_speech);
        }
        let _ = write!(line, " → {}", self.target_text);
        line
    }

    /// Short form plus an indented definition line when one exists.
    pub fn format_full(&self) -> String {
        let mut text = self.format_short();
        if !self.definition.is_empty() {
            let _ = write!(text, "\n  {}", self.definition);
        }
        text
    }
}

/// One line per hit, or blank-line separated full entries.
pub fn format_results(translations: &[Translation], include_definitions: bool) -> String {
    if translations.is_empty() {
        return NO_RESULTS.to_string();
    }
    if include_definitions {
        translations
            .iter()
            .map(Translation::format_full)
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        translations
            .iter()
            .map(Translation::format_short)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A dictionary backend. Failures are absorbed: an unreachable service
/// simply yields no translations.
pub trait Dictionary: Send + Sync {
    fn lookup(&self, word: &str, max_results: usize) -> Vec<Translation>;
}

/// Reduce a captured selection to the word to look up: the first
/// whitespace-separated token with surrounding punctuation removed.
pub fn lookup_word(selection: &str) -> Option<String> {
    let word = selection
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        None
    } else {
        Some(word.to_string())
    }
}

/// Final popup text for `word`.
pub fn lookup_display<D: Dictionary + ?Sized>(dictionary: &D, word: &str, max_results: usize) -> String {
    let translations = dictionary.lookup(word, max_results);
    tracing::info!(word, hits = translations.len(), "Lookup finished");
    if translations.is_empty() {
        format!("'{word}' - No translation found")
    } else {
        format_results(&translations, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hus() -> Translation {
        Translation {
            source_text: "hus".into(),
            target_text: "house".into(),
            part_of_speech: "noun".into(),
            definition: "a building for living in".into(),
        }
    }

    struct Fixed(Vec<Translation>);

    impl Dictionary for Fixed {
        fn lookup(&self, _word: &str, max_results: usize) -> Vec<Translation> {
            self.0.iter().take(max_results).cloned().collect()
        }
    }

    #[test]
    fn short_format_includes_part_of_speech() {
        assert_eq!(hus().format_short(), "hus (noun) → house");
        let bare = Translation {
            part_of_speech: String::new(),
            ..hus()
        };
        assert_eq!(bare.format_short(), "hus → house");
    }

    #[test]
    fn full_format_indents_definition() {
        assert_eq!(
            hus().format_full(),
            "hus (noun) → house\n  a building for living in"
        );
    }

    #[test]
    fn results_join_per_line() {
        let bil = Translation {
            source_text: "bil".into(),
            target_text: "car".into(),
            ..Default::default()
        };
        assert_eq!(
            format_results(&[hus(), bil], false),
            "hus (noun) → house\nbil → car"
        );
        assert_eq!(format_results(&[], false), "No results found");
    }

    #[test]
    fn lookup_word_takes_first_clean_token() {
        assert_eq!(lookup_word("  «Hytta», sa hun").as_deref(), Some("Hytta"));
        assert_eq!(lookup_word("blåbær.").as_deref(), Some("blåbær"));
        assert_eq!(lookup_word("e-post").as_deref(), Some("e-post"));
        assert_eq!(lookup_word("..."), None);
        assert_eq!(lookup_word("   "), None);
    }

    #[test]
    fn display_falls_back_when_nothing_found() {
        assert_eq!(
            lookup_display(&Fixed(vec![]), "xyz", 3),
            "'xyz' - No translation found"
        );
        assert_eq!(lookup_display(&Fixed(vec![hus()]), "hus", 3), "hus (noun) → house");
    }
}
