// src/pipeline/scan.rs

//! Second-person singular verb scan over single-tagged artifacts.

use std::fs;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::models::{ArtifactKind, Config};
use crate::services::CorpusManager;
use crate::storage::validate_dataset;

static SECOND_PERSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([А-Яа-я]*)<V\S*(ед)\S*(2-л)\S*>").expect("valid second person pattern")
});

/// Lemmas of singular second-person verbs in a single-tagged text.
pub fn find_second_person(tagged: &str) -> Vec<String> {
    SECOND_PERSON
        .captures_iter(tagged)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Scan the whole corpus and write the matches to the configured file.
pub fn run_scan(config: &Config) -> Result<Vec<String>> {
    let assets = &config.paths.assets_dir;
    validate_dataset(assets)?;

    let corpus = CorpusManager::new(assets)?;
    let mut found = Vec::new();
    for id in corpus.articles().keys().copied() {
        let tagged = corpus.storage().read_artifact(id, ArtifactKind::SingleTagged)?;
        found.extend(find_second_person(&tagged));
    }

    fs::write(&config.paths.second_person_file, found.join(" "))?;
    log::info!(
        "Found {} second-person verbs, written to {}",
        found.len(),
        config.paths.second_person_file.display()
    );
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn test_finds_singular_second_person_only() {
        let tagged = "ты<SPRO,ед,2-л=им> знать<V,несов,пе=непрош,ед,изъяв,2-л> \
                      знать<V,несов,пе=непрош,мн,изъяв,2-л> идти<V,несов,нп=непрош,ед,изъяв,3-л> \
                      делать<V,несов,пе=ед,пов,2-л>";
        assert_eq!(find_second_person(tagged), vec!["знать", "делать"]);
        assert!(find_second_person("").is_empty());
    }

    #[test]
    fn test_run_scan_writes_matches() {
        let tmp = TempDir::new().unwrap();
        let assets = tmp.path().join("articles");
        let storage = LocalStorage::new(&assets);
        for (id, tagged) in [
            (1, "знать<V,несов,пе=непрош,ед,изъяв,2-л>"),
            (2, "мир<S,муж,неод=им,ед> видеть<V,несов,пе=непрош,ед,изъяв,2-л>"),
        ] {
            let mut article = Article::new("https://example.com/a.pdf", id);
            article.text = "текст".into();
            storage.save_raw(&article).unwrap();
            storage
                .save_artifact(id, ArtifactKind::SingleTagged, tagged)
                .unwrap();
        }

        let mut config = Config::from_json(
            r#"{"seed_urls": ["http://example.com"], "total_articles_to_find_and_parse": 2}"#,
        )
        .unwrap();
        config.paths.assets_dir = assets;
        config.paths.second_person_file = tmp.path().join("2sg.txt");

        let found = run_scan(&config).unwrap();
        assert_eq!(found, vec!["знать", "видеть"]);
        assert_eq!(
            fs::read_to_string(tmp.path().join("2sg.txt")).unwrap(),
            "знать видеть"
        );
    }
}
