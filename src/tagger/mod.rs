/*!
 * Tokenizer/tagger boundary.
 *
 * This module contains client implementations for the external
 * tokenizer/tagger service:
 * - TreeTagger: subprocess driving a local TreeTagger install
 * - Mock: deterministic in-process tagger for tests and offline runs
 *
 * Given normalized text, a tagger returns one `(form, pos, lemma)` triple
 * per detected token, index-stable, deterministic for identical input.
 */

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::TaggerError;

pub use self::mock::{MockBehavior, MockTagger};
pub use self::treetagger::TreeTaggerClient;

pub mod mock;
pub mod treetagger;

/// One tagged token as returned by the service
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedToken {
    /// Surface form
    pub form: String,
    /// Part-of-speech tag
    pub pos: String,
    /// Lemma
    pub lemma: String,
}

impl TaggedToken {
    pub fn new<S: Into<String>>(form: S, pos: S, lemma: S) -> Self {
        TaggedToken {
            form: form.into(),
            pos: pos.into(),
            lemma: lemma.into(),
        }
    }
}

/// Common trait for all tagger implementations.
///
/// Implementations are read-only per call and safe to share across
/// workers. `tag` is synchronous: the tagger is a local subprocess or
/// model and is the one blocking call of the core transformation, which
/// runs on the blocking thread pool.
pub trait Tagger: Send + Sync + Debug {
    /// Tokenize and tag one normalized text run.
    ///
    /// Position `i` of the result is the `i`-th token in reading order.
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError>;

    /// Produce an independent handle for per-worker model loading.
    ///
    /// Used when the pipeline runs with the `replicate` model policy;
    /// the `shared` policy clones the registry handle instead.
    fn replicate(&self) -> Result<Arc<dyn Tagger>, TaggerError>;
}

/// Immutable mapping from a tagger variant identifier to a handle.
///
/// Built once, injected into the orchestrator at construction, never
/// mutated afterwards. Workers either share the registered handle or
/// replicate it, depending on the configured model policy.
#[derive(Debug, Clone, Default)]
pub struct TaggerRegistry {
    entries: HashMap<String, Arc<dyn Tagger>>,
}

impl TaggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handle under a variant identifier (builder style)
    pub fn register<S: Into<String>>(mut self, variant: S, tagger: Arc<dyn Tagger>) -> Self {
        self.entries.insert(variant.into(), tagger);
        self
    }

    /// Handle for a variant, shared
    pub fn get(&self, variant: &str) -> Option<Arc<dyn Tagger>> {
        self.entries.get(variant).cloned()
    }

    /// Known variant identifiers, sorted for stable error messages
    pub fn variants(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
