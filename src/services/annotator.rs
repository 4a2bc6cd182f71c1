// src/services/annotator.rs

//! Annotation pipeline.
//!
//! Runs every corpus article through the primary analyzer and the secondary
//! tagger and writes three renderings per article: cleaned words, lemmas with
//! primary tags, and lemmas with both tag sets.

use crate::error::Result;
use crate::models::{ArtifactKind, MorphologicalToken};
use crate::services::CorpusManager;
use crate::services::morphology::{MorphAnalyzer, SecondaryTagger};

/// Produces annotation artifacts for a whole corpus.
pub struct AnnotationPipeline<'a> {
    corpus: &'a CorpusManager,
    analyzer: &'a dyn MorphAnalyzer,
    tagger: &'a dyn SecondaryTagger,
}

impl<'a> AnnotationPipeline<'a> {
    pub fn new(
        corpus: &'a CorpusManager,
        analyzer: &'a dyn MorphAnalyzer,
        tagger: &'a dyn SecondaryTagger,
    ) -> Self {
        Self {
            corpus,
            analyzer,
            tagger,
        }
    }

    /// Annotate every article. Returns how many got artifacts.
    ///
    /// Artifacts are rebuilt from the raw text each time, so rerunning over
    /// unchanged input rewrites identical files. An article with no analysed
    /// word gets no artifacts, since the corpus may not hold empty files.
    pub fn run(&self) -> Result<usize> {
        let storage = self.corpus.storage();
        let mut annotated = 0;
        for id in self.corpus.articles().keys().copied() {
            let text = storage.read_raw(id)?;
            let tokens = self.process(&text)?;
            if tokens.is_empty() {
                log::warn!("Article {} has no analysable words, skipping", id);
                continue;
            }

            for kind in ArtifactKind::ALL {
                storage.save_artifact(id, kind, &render(&tokens, kind))?;
            }
            log::info!("Annotated article {} ({} tokens)", id, tokens.len());
            annotated += 1;
        }
        Ok(annotated)
    }

    /// Analyse raw text into tokens, dropping units without an analysis.
    pub fn process(&self, raw_text: &str) -> Result<Vec<MorphologicalToken>> {
        // The analyzer slows down badly on line breaks.
        let text = raw_text.replace('\n', " ");

        let tokens = self
            .analyzer
            .analyze(&text)?
            .into_iter()
            .filter_map(|unit| {
                let best = unit.best()?.clone();
                let secondary = self.tagger.tags(&unit.text).into_iter().next();
                Some(MorphologicalToken {
                    original_word: unit.text,
                    normalized_form: best.lemma,
                    primary_tags: best.tags,
                    secondary_tags: secondary.unwrap_or_default(),
                })
            })
            .collect();
        Ok(tokens)
    }
}

/// Space-joined rendering of `tokens` for one artifact kind.
pub fn render(tokens: &[MorphologicalToken], kind: ArtifactKind) -> String {
    tokens
        .iter()
        .map(|token| match kind {
            ArtifactKind::Cleaned => token.cleaned(),
            ArtifactKind::SingleTagged => token.single_tagged(),
            ArtifactKind::MultipleTagged => token.multiple_tagged(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::models::Article;
    use crate::services::morphology::{Analysis, Candidate, LexiconTagger};
    use crate::storage::{LocalStorage, validate_dataset};

    /// Splits on spaces and knows a fixed dictionary; records its inputs.
    #[derive(Default)]
    struct StubAnalyzer {
        inputs: RefCell<Vec<String>>,
    }

    impl MorphAnalyzer for StubAnalyzer {
        fn analyze(&self, text: &str) -> Result<Vec<Analysis>> {
            self.inputs.borrow_mut().push(text.to_string());
            let known = HashMap::from([
                ("привет", ("привет", "S,муж,неод=им,ед")),
                ("мир", ("мир", "S,муж,неод=им,ед")),
                ("знаешь", ("знать", "V,несов,пе=непрош,ед,изъяв,2-л")),
            ]);
            Ok(text
                .split(' ')
                .map(|word| Analysis {
                    text: word.to_string(),
                    candidates: known
                        .get(word.to_lowercase().as_str())
                        .map(|(lemma, tags)| {
                            vec![Candidate {
                                lemma: lemma.to_string(),
                                tags: tags.to_string(),
                            }]
                        })
                        .unwrap_or_default(),
                })
                .collect())
        }
    }

    fn tagger() -> LexiconTagger {
        LexiconTagger::from_entries(HashMap::from([(
            "мир".to_string(),
            vec![
                "NOUN,inan,masc sing,nomn".to_string(),
                "NOUN,inan,masc sing,accs".to_string(),
            ],
        )]))
    }

    fn corpus_with(texts: &[&str]) -> (TempDir, CorpusManager) {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        for (idx, text) in texts.iter().enumerate() {
            let mut article = Article::new("https://example.com/1.pdf", idx + 1);
            article.text = text.to_string();
            storage.save_raw(&article).unwrap();
        }
        let corpus = CorpusManager::new(tmp.path()).unwrap();
        (tmp, corpus)
    }

    #[test]
    fn test_line_breaks_become_spaces_and_unknown_units_drop() {
        let (_tmp, corpus) = corpus_with(&[]);
        let analyzer = StubAnalyzer::default();
        let tagger = tagger();
        let pipeline = AnnotationPipeline::new(&corpus, &analyzer, &tagger);

        let tokens = pipeline.process("Привет\nмир").unwrap();
        assert_eq!(analyzer.inputs.borrow().as_slice(), ["Привет мир"]);
        assert_eq!(
            render(&tokens, ArtifactKind::Cleaned),
            "привет мир"
        );
        assert_eq!(
            render(&tokens, ArtifactKind::MultipleTagged),
            "привет<S,муж,неод=им,ед>(UNKN) мир<S,муж,неод=им,ед>(NOUN,inan,masc sing,nomn)"
        );

        let tokens = pipeline.process("Привет , абырвалг\nмир").unwrap();
        assert_eq!(render(&tokens, ArtifactKind::Cleaned), "привет мир");
    }

    #[test]
    fn test_run_writes_three_artifacts() {
        let (tmp, corpus) = corpus_with(&["Привет мир", "Ты знаешь"]);
        let analyzer = StubAnalyzer::default();
        let tagger = tagger();
        let pipeline = AnnotationPipeline::new(&corpus, &analyzer, &tagger);

        assert_eq!(pipeline.run().unwrap(), 2);

        let storage = LocalStorage::new(tmp.path());
        assert_eq!(
            storage.read_artifact(2, ArtifactKind::SingleTagged).unwrap(),
            "знать<V,несов,пе=непрош,ед,изъяв,2-л>"
        );
        assert_eq!(
            storage.read_artifact(1, ArtifactKind::Cleaned).unwrap(),
            "привет мир"
        );
        // Raw text and metadata are left untouched.
        assert_eq!(storage.read_raw(1).unwrap(), "Привет мир");
        assert_eq!(storage.read_meta(1).unwrap().id, 1);
    }

    #[test]
    fn test_article_without_analysis_keeps_corpus_valid() {
        let (tmp, corpus) = corpus_with(&["абырвалг", "Привет мир"]);
        let analyzer = StubAnalyzer::default();
        let tagger = tagger();
        let pipeline = AnnotationPipeline::new(&corpus, &analyzer, &tagger);
        let storage = LocalStorage::new(tmp.path());

        assert_eq!(pipeline.run().unwrap(), 1);
        assert!(!storage.artifact_path(1, ArtifactKind::Cleaned).exists());
        assert!(storage.artifact_path(2, ArtifactKind::Cleaned).exists());

        validate_dataset(tmp.path()).unwrap();
        assert_eq!(pipeline.run().unwrap(), 1);
        validate_dataset(tmp.path()).unwrap();
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let (tmp, corpus) = corpus_with(&["Привет\nмир знаешь"]);
        let analyzer = StubAnalyzer::default();
        let tagger = tagger();
        let pipeline = AnnotationPipeline::new(&corpus, &analyzer, &tagger);
        let storage = LocalStorage::new(tmp.path());

        pipeline.run().unwrap();
        let first: Vec<_> = ArtifactKind::ALL
            .iter()
            .map(|kind| fs::read(storage.artifact_path(1, *kind)).unwrap())
            .collect();

        pipeline.run().unwrap();
        let second: Vec<_> = ArtifactKind::ALL
            .iter()
            .map(|kind| fs::read(storage.artifact_path(1, *kind)).unwrap())
            .collect();

        assert_eq!(first, second);
    }
}
