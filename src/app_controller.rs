use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::pipeline::{BatchRequest, Document, Orchestrator};
use crate::pivot::OutputKind;
use crate::tagger::{MockTagger, TaggerRegistry, TreeTaggerClient};

// @module: Application controller for document conversion

/// Main application controller for the conversion pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        let mut config = Config::default();
        config.tagger.use_mock = true;
        Self::with_config(config)
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Build the tagger registry the orchestrator is constructed with.
    /// The registry is immutable after this point.
    fn build_registry(&self) -> Result<TaggerRegistry> {
        let variant = self.config.tagger.variant.clone();

        if self.config.tagger.use_mock {
            debug!("Using the mock tagger for variant '{}'", variant);
            return Ok(TaggerRegistry::new().register(variant, Arc::new(MockTagger::working())));
        }

        let client = TreeTaggerClient::new(&self.config.tagger.treetagger_path, &variant)
            .context("Failed to set up the TreeTagger client")?;
        Ok(TaggerRegistry::new().register(variant, Arc::new(client)))
    }

    /// Run the conversion for a single file or a whole directory
    pub async fn run(&self, input_path: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        let inputs = if input_path.is_file() {
            vec![input_path]
        } else if input_path.is_dir() {
            FileManager::find_documents(&input_path)?
        } else {
            return Err(anyhow!("Input path does not exist: {:?}", input_path));
        };

        if inputs.is_empty() {
            warn!("No processable documents found (looked for .xml/.tei/.pivot.json files)");
            return Ok(());
        }

        FileManager::ensure_dir(&output_dir)?;

        let documents = self.collect_documents(&inputs, &output_dir, force_overwrite)?;
        if documents.is_empty() {
            info!("Nothing to do, every output already exists (use -f to force overwrite)");
            return Ok(());
        }

        let total = documents.len();
        info!("Converting {} document(s)", total);

        let registry = self.build_registry()?;
        let orchestrator = Orchestrator::new(registry)
            .with_pool_size(self.config.pipeline.workers)
            .with_model_policy(self.config.tagger.model_policy);

        let request = BatchRequest::new(documents, self.config.tagger.variant.clone())
            .with_outputs(self.config.pipeline.outputs.iter().copied())
            .with_tags(self.config.pipeline.tags.iter().cloned());

        let progress = ProgressBar::new(total as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} documents",
            )?
            .progress_chars("#>-"),
        );

        let bar = progress.clone();
        let outcome = orchestrator
            .run_with_progress(request, move |done, _| bar.set_position(done as u64))
            .await?;
        progress.finish_and_clear();

        for file in &outcome.files {
            let target = output_dir.join(&file.name);
            FileManager::write_to_file(&target, &file.content)?;
            debug!("Wrote {:?}", target);
        }
        info!("Wrote {} output file(s) to {:?}", outcome.files.len(), output_dir);

        if !outcome.failures.is_empty() {
            for failure in &outcome.failures {
                warn!("Document '{}' failed: {}", failure.document, failure.error);
            }
            return Err(anyhow!(
                "{} of {} document(s) failed",
                outcome.failures.len(),
                total
            ));
        }

        Ok(())
    }

    /// Read the batch's documents, skipping those whose outputs all exist
    fn collect_documents(
        &self,
        inputs: &[PathBuf],
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(inputs.len());

        for path in inputs {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .ok_or_else(|| anyhow!("Input path has no file name: {:?}", path))?;

            let kind = FileManager::detect_content_kind(path);
            let content = FileManager::read_to_string(path)?;
            let document = Document::new(name, content, kind);

            if !force_overwrite && self.outputs_exist(&document, output_dir) {
                warn!(
                    "Skipping '{}', outputs already exist (use -f to force overwrite)",
                    document.name
                );
                continue;
            }

            documents.push(document);
        }

        Ok(documents)
    }

    /// True when every requested output for this document is already on disk
    fn outputs_exist(&self, document: &Document, output_dir: &Path) -> bool {
        let outputs: &[OutputKind] = if self.config.pipeline.outputs.is_empty() {
            &[OutputKind::Json]
        } else {
            &self.config.pipeline.outputs
        };

        outputs.iter().all(|kind| {
            let target = output_dir.join(format!("{}{}", document.stem(), kind.file_suffix()));
            FileManager::file_exists(target)
        })
    }
}
