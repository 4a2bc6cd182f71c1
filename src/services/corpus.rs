// src/services/corpus.rs

//! Corpus manager: indexes persisted articles by id.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::models::Article;
use crate::storage::local::RAW_SUFFIX;
use crate::storage::{LocalStorage, id_from_path};

/// Registry of the raw articles in a corpus directory.
///
/// Numbering is not checked here; run
/// [`validate_dataset`](crate::storage::validate_dataset) first.
#[derive(Debug)]
pub struct CorpusManager {
    storage: LocalStorage,
    articles: BTreeMap<usize, Article>,
}

impl CorpusManager {
    /// Scan `path` and register a placeholder for every raw-text file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut articles = BTreeMap::new();

        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let is_raw = entry.file_name().to_string_lossy().ends_with(RAW_SUFFIX);
            if !is_raw {
                continue;
            }
            let id = id_from_path(&entry.path())?;
            articles.insert(id, Article::placeholder(id));
        }

        log::info!("Registered {} articles from {}", articles.len(), path.display());
        Ok(Self {
            storage: LocalStorage::new(path),
            articles,
        })
    }

    pub fn articles(&self) -> &BTreeMap<usize, Article> {
        &self.articles
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
