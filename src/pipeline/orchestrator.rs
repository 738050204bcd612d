/*!
 * Pipeline orchestrator.
 *
 * Validates the batch request, computes the union tag set that drives
 * pivot construction, fans documents out to a bounded pool of stateless
 * workers and fans the per-document output files back into one
 * collection ordered by document input order.
 *
 * A document failure never aborts its siblings: it is collected into the
 * batch outcome and reported per document. Only configuration errors
 * stop the run before any document is processed.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use futures::stream::{self, StreamExt};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::encoders;
use crate::errors::PipelineError;
use crate::pipeline::request::{
    BatchOutcome, BatchRequest, ContentKind, Document, DocumentFailure, OutputFile, OutputRequest,
};
use crate::pivot::{filter_tree, OutputKind, PivotBuilder, PivotTree, TagSet};
use crate::tagger::{Tagger, TaggerRegistry};

/// How workers obtain their tagger handle.
///
/// A deployment-time memory/contention tradeoff, not a correctness one:
/// `Shared` hands every worker the same read-only handle, `Replicate`
/// loads an independent instance per worker.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModelPolicy {
    #[default]
    Shared,
    Replicate,
}

/// Fan-out/fan-in coordinator for one batch of documents
pub struct Orchestrator {
    /// Immutable variant-to-handle mapping, injected at construction
    registry: TaggerRegistry,

    /// Maximum number of documents processed in parallel
    pool_size: usize,

    /// Worker tagger-handle policy
    model_policy: ModelPolicy,
}

impl Orchestrator {
    /// Create an orchestrator over a tagger registry. The pool defaults
    /// to the available hardware parallelism.
    pub fn new(registry: TaggerRegistry) -> Self {
        let pool_size = thread::available_parallelism().map(usize::from).unwrap_or(1);
        Orchestrator {
            registry,
            pool_size,
            model_policy: ModelPolicy::default(),
        }
    }

    /// Override the worker pool size (builder style)
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }

    /// Override the model policy (builder style)
    pub fn with_model_policy(mut self, policy: ModelPolicy) -> Self {
        self.model_policy = policy;
        self
    }

    /// Run a batch without progress reporting
    pub async fn run(&self, request: BatchRequest) -> Result<BatchOutcome, PipelineError> {
        self.run_with_progress(request, |_, _| {}).await
    }

    /// Run a batch, invoking `progress(done, total)` as documents complete
    pub async fn run_with_progress(
        &self,
        request: BatchRequest,
        progress: impl Fn(usize, usize) + Clone + Send + 'static,
    ) -> Result<BatchOutcome, PipelineError> {
        // Everything that can make the whole batch invalid is checked
        // here, before any document is touched
        let requests = resolve_requests(&request.outputs, &request.tags)?;
        let union = requests
            .iter()
            .fold(TagSet::new(), |acc, r| acc.union(&r.tags));
        let shared_tagger = self.registry.get(&request.tagger).ok_or_else(|| {
            PipelineError::Configuration(format!(
                "unknown tagger variant '{}' (known: {})",
                request.tagger,
                self.registry.variants().join(", ")
            ))
        })?;

        debug!(
            "Processing {} documents with union tags {:?}",
            request.documents.len(),
            union
        );

        let total = request.documents.len();
        let completed = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(requests);
        let union = Arc::new(union);

        // One stateless task per document; completion order is arbitrary,
        // the index carried through puts results back in input order
        let mut results = stream::iter(request.documents.into_iter().enumerate())
            .map(|(index, document)| {
                let requests = Arc::clone(&requests);
                let union = Arc::clone(&union);
                let completed = Arc::clone(&completed);
                let progress = progress.clone();
                let tagger = match self.model_policy {
                    ModelPolicy::Shared => Ok(Arc::clone(&shared_tagger)),
                    ModelPolicy::Replicate => {
                        shared_tagger.replicate().map_err(PipelineError::Tagger)
                    }
                };

                async move {
                    let name = document.name.clone();
                    let result = match tagger {
                        Ok(tagger) => {
                            // The transformation is synchronous (the tagger
                            // call blocks), so it runs off the async runtime
                            task::spawn_blocking(move || {
                                process_document(&document, &requests, &union, tagger.as_ref())
                            })
                            .await
                            .unwrap_or_else(|e| Err(PipelineError::Worker(e.to_string())))
                        }
                        Err(e) => Err(e),
                    };

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress(done, total);

                    (index, name, result)
                }
            })
            .buffer_unordered(self.pool_size)
            .collect::<Vec<_>>()
            .await;

        // Restore document input order before flattening
        results.sort_by_key(|(index, _, _)| *index);

        let mut outcome = BatchOutcome::default();
        for (_, name, result) in results {
            match result {
                Ok(files) => outcome.files.extend(files),
                Err(e) => {
                    error!("Document '{}' failed: {}", name, e);
                    outcome.failures.push(DocumentFailure { document: name, error: e });
                }
            }
        }

        Ok(outcome)
    }
}

/// Pair every requested output kind with its tag set.
///
/// An empty tag-set list means the full set everywhere; a single entry is
/// reused for every output; any other length mismatch is a configuration
/// error.
fn resolve_requests(
    outputs: &[OutputKind],
    tags: &[TagSet],
) -> Result<Vec<OutputRequest>, PipelineError> {
    let outputs: Vec<OutputKind> = if outputs.is_empty() {
        vec![OutputKind::Json]
    } else {
        outputs.to_vec()
    };

    let tags: Vec<TagSet> = match tags.len() {
        0 => vec![TagSet::full(); outputs.len()],
        1 => vec![tags[0].clone(); outputs.len()],
        n if n == outputs.len() => tags.to_vec(),
        n => {
            return Err(PipelineError::Configuration(format!(
                "{} tag sets for {} outputs; provide one per output or a single reusable set",
                n,
                outputs.len()
            )));
        }
    };

    Ok(outputs
        .into_iter()
        .zip(tags)
        .map(|(kind, tags)| OutputRequest { kind, tags })
        .collect())
}

/// Process one document: classify, build (or accept) the pivot, then
/// filter and encode every requested output in the fixed kind order
fn process_document(
    document: &Document,
    requests: &[OutputRequest],
    union: &TagSet,
    tagger: &dyn Tagger,
) -> Result<Vec<OutputFile>, PipelineError> {
    let pivot = match document.kind {
        ContentKind::Markup => {
            PivotBuilder::new(union.clone(), tagger).build(&document.content)?
        }
        // Pre-built pivots are trusted: no tagging, no metadata extraction
        ContentKind::Pivot => PivotTree::from_json(&document.content)?,
        other => {
            return Err(PipelineError::UnsupportedInput(format!(
                "document '{}' has content kind {:?}; only markup and pre-built pivots are supported",
                document.name, other
            )));
        }
    };

    let mut files = Vec::new();
    for kind in OutputKind::ENCODING_ORDER {
        let Some(request) = requests.iter().find(|r| r.kind == kind) else {
            continue;
        };

        let content = if kind == OutputKind::Pivot {
            // The pivot output is the one unfiltered view, metadata included
            encoders::encode(kind, &pivot)?
        } else {
            let view = filter_tree(&pivot, &request.tags)?;
            encoders::encode(kind, &view)?
        };

        files.push(OutputFile {
            name: format!("{}{}", document.stem(), kind.file_suffix()),
            content,
        });
    }

    Ok(files)
}
