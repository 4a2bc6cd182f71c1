//! Local filesystem storage for the numbered article corpus.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── {id}_raw.txt              # Extracted text, written once
//! ├── {id}_meta.json            # Metadata record, written once
//! ├── {id}_cleaned.txt          # Artifacts, regenerated by every annotate run
//! ├── {id}_single_tagged.txt
//! └── {id}_multiple_tagged.txt
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};
use crate::models::{Article, ArticleMeta, ArtifactKind};

/// Suffix identifying raw-text files.
pub const RAW_SUFFIX: &str = "_raw.txt";

/// Suffix identifying metadata files.
pub const META_SUFFIX: &str = "_meta.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Remove any previous corpus and recreate an empty directory.
    pub fn prepare(&self) -> Result<()> {
        match fs::remove_dir_all(&self.root_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::Io(e)),
        }
        fs::create_dir_all(&self.root_dir)?;
        Ok(())
    }

    pub fn raw_path(&self, id: usize) -> PathBuf {
        self.root_dir.join(format!("{id}{RAW_SUFFIX}"))
    }

    pub fn meta_path(&self, id: usize) -> PathBuf {
        self.root_dir.join(format!("{id}{META_SUFFIX}"))
    }

    pub fn artifact_path(&self, id: usize, kind: ArtifactKind) -> PathBuf {
        self.root_dir.join(format!("{id}_{}.txt", kind.suffix()))
    }

    /// Write bytes atomically (write to temp, then rename).
    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(path, &bytes)
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Persist an article's raw text and metadata record.
    pub fn save_raw(&self, article: &Article) -> Result<()> {
        self.write_bytes(&self.raw_path(article.id), article.text.as_bytes())?;
        self.write_json(&self.meta_path(article.id), &article.meta())?;
        log::debug!("Saved article {} to {}", article.id, self.root_dir.display());
        Ok(())
    }

    pub fn read_raw(&self, id: usize) -> Result<String> {
        Ok(fs::read_to_string(self.raw_path(id))?)
    }

    pub fn read_meta(&self, id: usize) -> Result<ArticleMeta> {
        self.read_json(&self.meta_path(id))
    }

    /// Load an article with its text and metadata.
    pub fn load_article(&self, id: usize) -> Result<Article> {
        let meta = self.read_meta(id)?;
        Ok(Article {
            id: meta.id,
            url: meta.url,
            title: meta.title,
            author: meta.author,
            topics: meta.topics,
            date: meta.date,
            text: self.read_raw(id)?,
        })
    }

    /// Replace an artifact file with `content`.
    pub fn save_artifact(&self, id: usize, kind: ArtifactKind, content: &str) -> Result<()> {
        self.write_bytes(&self.artifact_path(id, kind), content.as_bytes())
    }

    pub fn read_artifact(&self, id: usize, kind: ArtifactKind) -> Result<String> {
        Ok(fs::read_to_string(self.artifact_path(id, kind))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_article(id: usize) -> Article {
        Article {
            id,
            url: format!("https://example.com/article/download/{id}.pdf"),
            title: "О морфологии".to_string(),
            author: "Иванов И. И.".to_string(),
            topics: vec!["лингвистика".to_string()],
            date: NaiveDate::from_ymd_opt(2019, 3, 12),
            text: "Привет\nмир".to_string(),
        }
    }

    #[test]
    fn test_save_and_load_article() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let article = sample_article(1);
        storage.save_raw(&article).unwrap();

        assert!(tmp.path().join("1_raw.txt").exists());
        assert!(tmp.path().join("1_meta.json").exists());
        assert_eq!(storage.load_article(1).unwrap(), article);
    }

    #[test]
    fn test_prepare_clears_previous_corpus() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("articles");
        let storage = LocalStorage::new(&root);

        storage.save_raw(&sample_article(1)).unwrap();
        storage.prepare().unwrap();

        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn test_artifact_paths() {
        let storage = LocalStorage::new("corpus");
        assert_eq!(
            storage.artifact_path(3, ArtifactKind::MultipleTagged),
            PathBuf::from("corpus").join("3_multiple_tagged.txt")
        );
    }

    #[test]
    fn test_read_missing_raw_fails() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        assert!(matches!(storage.read_raw(9), Err(AppError::Io(_))));
    }
}
