/*!
 * Mock tagger implementations for testing.
 *
 * This module provides mock taggers that simulate different behaviors:
 * - `MockTagger::working()` - deterministic whitespace tokenization
 * - `MockTagger::intermittent(n)` - fails every nth call
 * - `MockTagger::failing()` - always fails with an error
 * - `MockTagger::empty()` - returns no tokens at all
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::TaggerError;
use crate::tagger::{TaggedToken, Tagger};

/// Behavior mode for the mock tagger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Deterministic tokenization: split on whitespace, lowercased lemma,
    /// punctuation-aware POS
    Working,
    /// Fails intermittently (every nth call)
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty token sequence
    Empty,
}

/// Mock tagger for testing pipeline behavior
#[derive(Debug)]
pub struct MockTagger {
    /// Behavior mode
    behavior: MockBehavior,
    /// Call counter for intermittent failures
    call_count: Arc<AtomicUsize>,
}

impl MockTagger {
    /// Create a new mock tagger with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock tagger that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create an intermittently failing mock tagger
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a failing mock tagger that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock tagger that returns no tokens
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of `tag` calls made through this tagger (and its clones)
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn tokenize(text: &str) -> Vec<TaggedToken> {
        text.split_whitespace()
            .map(|chunk| {
                let pos = if chunk.chars().all(|c| !c.is_alphanumeric()) {
                    "PUN"
                } else {
                    "WORD"
                };
                TaggedToken::new(chunk.to_string(), pos.to_string(), chunk.to_lowercase())
            })
            .collect()
    }
}

impl Clone for MockTagger {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            call_count: Arc::clone(&self.call_count),
        }
    }
}

impl Tagger for MockTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(Self::tokenize(text)),

            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(TaggerError::ProcessFailed(format!(
                        "simulated intermittent failure (call #{})",
                        count + 1
                    )))
                } else {
                    Ok(Self::tokenize(text))
                }
            }

            MockBehavior::Failing => Err(TaggerError::ProcessFailed(
                "simulated tagger failure".to_string(),
            )),

            MockBehavior::Empty => Ok(Vec::new()),
        }
    }

    fn replicate(&self) -> Result<Arc<dyn Tagger>, TaggerError> {
        Ok(Arc::new(self.clone()))
    }
}
