//! Article data structures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A harvested article.
///
/// Raw text and metadata are persisted once during extraction; annotation only
/// adds artifact files next to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    /// 1-based position in the corpus
    pub id: usize,

    /// Document URL the text was extracted from
    pub url: String,

    pub title: String,

    pub author: String,

    pub topics: Vec<String>,

    /// Publication date, parsed from the document text
    pub date: Option<NaiveDate>,

    /// Raw extracted text (empty for corpus placeholders)
    pub text: String,
}

impl Article {
    /// Create an empty article for the given document URL.
    pub fn new(url: impl Into<String>, id: usize) -> Self {
        Self {
            id,
            url: url.into(),
            ..Self::default()
        }
    }

    /// Placeholder registered by the corpus manager before text is loaded.
    pub fn placeholder(id: usize) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// Metadata record persisted next to the raw text.
    pub fn meta(&self) -> ArticleMeta {
        ArticleMeta {
            id: self.id,
            url: self.url.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            topics: self.topics.clone(),
            date: self.date,
        }
    }
}

/// On-disk metadata record (`{id}_meta.json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMeta {
    pub id: usize,
    pub url: String,
    pub title: String,
    pub author: String,
    pub topics: Vec<String>,
    pub date: Option<NaiveDate>,
}

/// Derived renderings written by the annotation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Cleaned,
    SingleTagged,
    MultipleTagged,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Cleaned,
        ArtifactKind::SingleTagged,
        ArtifactKind::MultipleTagged,
    ];

    /// File name suffix for this artifact.
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::Cleaned => "cleaned",
            ArtifactKind::SingleTagged => "single_tagged",
            ArtifactKind::MultipleTagged => "multiple_tagged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_serialization() {
        let mut article = Article::new("https://example.com/download/1.pdf", 1);
        article.title = "Заголовок".to_string();
        article.date = NaiveDate::from_ymd_opt(2019, 3, 12);
        article.text = "not part of meta".to_string();

        let json = serde_json::to_value(article.meta()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["date"], "2019-03-12");
        assert!(json.get("text").is_none());
    }
}
