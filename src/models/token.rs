//! Per-word annotation produced while processing one article.

/// One analysed word occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorphologicalToken {
    /// Surface form as it appeared in the text
    pub original_word: String,

    /// Lemma from the primary analyzer
    pub normalized_form: String,

    /// Grammatical tags from the primary analyzer
    pub primary_tags: String,

    /// Grammatical tags from the secondary analyzer
    pub secondary_tags: String,
}

impl MorphologicalToken {
    /// Lowercased surface form.
    pub fn cleaned(&self) -> String {
        self.original_word.to_lowercase()
    }

    /// `lemma<primary>`
    pub fn single_tagged(&self) -> String {
        format!("{}<{}>", self.normalized_form, self.primary_tags)
    }

    /// `lemma<primary>(secondary)`
    pub fn multiple_tagged(&self) -> String {
        format!(
            "{}<{}>({})",
            self.normalized_form, self.primary_tags, self.secondary_tags
        )
    }
}
