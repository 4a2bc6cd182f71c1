// src/pipeline/annotate.rs

//! Annotation pipeline entry point.

use crate::error::Result;
use crate::models::{Config, PathsConfig};
use crate::services::morphology::{LexiconTagger, MystemAnalyzer, SecondaryTagger};
use crate::services::{AnnotationPipeline, CorpusManager};
use crate::storage::validate_dataset;

/// Validate the corpus and annotate every article in it.
pub fn run_annotate(config: &Config) -> Result<usize> {
    let assets = &config.paths.assets_dir;
    validate_dataset(assets)?;

    let corpus = CorpusManager::new(assets)?;
    let analyzer = MystemAnalyzer::new(&config.paths.mystem_binary);
    let tagger = secondary_tagger(&config.paths)?;

    let count = AnnotationPipeline::new(&corpus, &analyzer, tagger.as_ref()).run()?;
    log::info!("Annotated {} articles in {}", count, assets.display());
    Ok(count)
}

/// A configured lexicon takes precedence over the bundled dictionary.
fn secondary_tagger(paths: &PathsConfig) -> Result<Box<dyn SecondaryTagger>> {
    if let Some(path) = &paths.lexicon_file {
        let tagger = LexiconTagger::load(path)?;
        log::info!("Loaded {} lexicon entries from {}", tagger.len(), path.display());
        return Ok(Box::new(tagger));
    }

    #[cfg(feature = "opencorpora")]
    {
        log::info!("Using the OpenCorpora dictionary for secondary tags");
        Ok(Box::new(crate::services::morphology::OpencorporaTagger::new()))
    }

    #[cfg(not(feature = "opencorpora"))]
    {
        log::warn!("No lexicon configured; secondary tags will all be unknown");
        Ok(Box::new(LexiconTagger::default()))
    }
}
