// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::Config;
use crate::storage::validate_dataset;

/// Report on the loaded configuration and, if it exists, the corpus.
pub fn run_validate(config: &Config) -> Result<()> {
    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }
    log::info!("✓ Config OK");
    log::info!("  Seed URLs: {}", config.target.seed_urls.len());
    log::info!("  Articles to collect: {}", config.target.max_articles);
    log::info!("  User agent: {}", config.crawler.user_agent);
    log::info!("  Timeout: {}s", config.crawler.timeout_secs);
    log::info!("  Max concurrent: {}", config.crawler.max_concurrent);

    let assets = &config.paths.assets_dir;
    if !assets.exists() {
        log::info!("No corpus at {} yet", assets.display());
        return Ok(());
    }
    if let Err(e) = validate_dataset(assets) {
        log::error!("Corpus validation failed: {}", e);
        return Err(e);
    }
    log::info!("✓ Corpus OK at {}", assets.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(assets: std::path::PathBuf) -> Config {
        let mut config = Config::from_json(
            r#"{"seed_urls": ["http://example.com"], "total_articles_to_find_and_parse": 1}"#,
        )
        .unwrap();
        config.paths.assets_dir = assets;
        config
    }

    #[test]
    fn test_missing_corpus_is_fine() {
        let tmp = TempDir::new().unwrap();
        assert!(run_validate(&config(tmp.path().join("absent"))).is_ok());
    }

    #[test]
    fn test_broken_corpus_fails() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("1_raw.txt"), "текст").unwrap();
        assert!(run_validate(&config(tmp.path().to_path_buf())).is_err());
    }
}
