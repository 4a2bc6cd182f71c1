//! Pluggable morphological analyzers.
//!
//! The annotation pipeline talks to two independent analyzers: a primary one
//! that tokenizes text and proposes lemmas with tags, and a secondary one that
//! tags single surface forms.

mod lexicon;
mod mystem;
#[cfg(feature = "opencorpora")]
mod opencorpora;

pub use lexicon::{LexiconTagger, UNKNOWN_TAG};
pub use mystem::MystemAnalyzer;
#[cfg(feature = "opencorpora")]
pub use opencorpora::OpencorporaTagger;

use crate::error::Result;

/// One candidate reading of a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub lemma: String,
    pub tags: String,
}

/// A unit of analyzed text. Punctuation and whitespace units carry no
/// candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub text: String,
    pub candidates: Vec<Candidate>,
}

impl Analysis {
    /// First candidate, if the analyzer recognised the unit.
    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }
}

/// Tokenizes text and analyses every unit.
pub trait MorphAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Analysis>>;
}

/// Tags a single surface form; candidates are ordered by likelihood.
pub trait SecondaryTagger {
    fn tags(&self, word: &str) -> Vec<String>;
}
