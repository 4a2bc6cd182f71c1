//! Secondary tagger backed by the OpenCorpora dictionary.

use rsmorphy::prelude::*;

use super::SecondaryTagger;
use super::lexicon::UNKNOWN_TAG;

/// Dictionary tagger producing OpenCorpora tag strings such as
/// `NOUN,inan,masc sing,nomn`, most likely parse first.
pub struct OpencorporaTagger {
    morph: MorphAnalyzer,
}

impl OpencorporaTagger {
    /// Load the Russian dictionary bundled with `rsmorphy-dict-ru`.
    pub fn new() -> Self {
        log::debug!("Loading OpenCorpora dictionary from {}", rsmorphy_dict_ru::DICT_PATH);
        Self {
            morph: MorphAnalyzer::from_file(rsmorphy_dict_ru::DICT_PATH),
        }
    }
}

impl Default for OpencorporaTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl SecondaryTagger for OpencorporaTagger {
    fn tags(&self, word: &str) -> Vec<String> {
        let tags: Vec<String> = self
            .morph
            .parse(&word.to_lowercase())
            .iter()
            .map(|parsed| parsed.lex.get_tag(&self.morph).string.to_string())
            .collect();

        if tags.is_empty() {
            vec![UNKNOWN_TAG.to_string()]
        } else {
            tags
        }
    }
}
