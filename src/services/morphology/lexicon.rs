//! Secondary tagger backed by a word-to-tags lexicon.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::SecondaryTagger;
use crate::error::Result;

/// Tag reported for words missing from the lexicon.
pub const UNKNOWN_TAG: &str = "UNKN";

/// Case-insensitive lexicon lookup.
///
/// The lexicon file is a JSON object mapping lowercase word forms to their
/// tag strings, most likely first:
///
/// ```json
/// {"мир": ["NOUN,inan,masc sing,nomn", "NOUN,inan,masc sing,accs"]}
/// ```
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    entries: HashMap<String, Vec<String>>,
}

impl LexiconTagger {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(&content)?;
        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: HashMap<String, Vec<String>>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|(_, tags)| !tags.is_empty())
            .map(|(word, tags)| (word.to_lowercase(), tags))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SecondaryTagger for LexiconTagger {
    fn tags(&self, word: &str) -> Vec<String> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_else(|| vec![UNKNOWN_TAG.to_string()])
    }
}
