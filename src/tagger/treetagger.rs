/*!
 * TreeTagger subprocess client.
 *
 * Drives a local TreeTagger installation through its per-language
 * tokenize-and-tag shell command (`cmd/tree-tagger-<language>`). Text is
 * fed on stdin; the command prints one `form<TAB>pos<TAB>lemma` line per
 * token.
 */

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use log::debug;

use crate::errors::TaggerError;
use crate::tagger::{TaggedToken, Tagger};

/// Language variants with a known TreeTagger command
const KNOWN_VARIANTS: [(&str, &str); 3] = [
    ("french", "tree-tagger-french"),
    ("old_french", "tree-tagger-old-french"),
    ("french_spoken", "tree-tagger-french-spoken"),
];

/// Client for one TreeTagger language command
#[derive(Debug, Clone)]
pub struct TreeTaggerClient {
    /// Full path to the tokenize-and-tag command
    command: PathBuf,
    /// Variant identifier the client was built for
    variant: String,
}

impl TreeTaggerClient {
    /// Build a client for a language variant against a TreeTagger install
    /// directory (the directory containing `cmd/`)
    pub fn new<P: AsRef<Path>>(install_dir: P, variant: &str) -> Result<Self, TaggerError> {
        let script = KNOWN_VARIANTS
            .iter()
            .find(|(name, _)| *name == variant)
            .map(|(_, script)| *script)
            .ok_or_else(|| TaggerError::UnknownModel(variant.to_string()))?;

        Ok(TreeTaggerClient {
            command: install_dir.as_ref().join("cmd").join(script),
            variant: variant.to_string(),
        })
    }

    /// Parse one output line into a token triple
    fn parse_line(line: &str) -> Result<TaggedToken, TaggerError> {
        let mut fields = line.split('\t');
        match (fields.next(), fields.next(), fields.next()) {
            (Some(form), Some(pos), Some(lemma)) => {
                Ok(TaggedToken::new(form.trim(), pos.trim(), lemma.trim()))
            }
            _ => Err(TaggerError::ParseError(format!(
                "expected form<TAB>pos<TAB>lemma, got: {}",
                line
            ))),
        }
    }
}

impl Tagger for TreeTaggerClient {
    fn tag(&self, text: &str) -> Result<Vec<TaggedToken>, TaggerError> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        debug!("Tagging {} chars with variant {}", text.len(), self.variant);

        let mut child = Command::new(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                TaggerError::ProcessFailed(format!("failed to spawn {:?}: {}", self.command, e))
            })?;

        // stdin handle is dropped after the write so the child sees EOF
        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                TaggerError::ProcessFailed("tagger stdin unavailable".to_string())
            })?;
            stdin
                .write_all(text.as_bytes())
                .map_err(|e| TaggerError::ProcessFailed(format!("write to tagger: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| TaggerError::ProcessFailed(format!("wait for tagger: {}", e)))?;

        if !output.status.success() {
            return Err(TaggerError::ProcessFailed(format!(
                "tagger exited with {}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(Self::parse_line)
            .collect()
    }

    fn replicate(&self) -> Result<Arc<dyn Tagger>, TaggerError> {
        // A client holds no per-call state; a fresh clone is an
        // independent handle since every call spawns its own process
        Ok(Arc::new(self.clone()))
    }
}
