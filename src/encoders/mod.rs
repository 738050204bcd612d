/*!
 * Format encoders.
 *
 * Each encoder serializes a filtered pivot tree into one output format.
 * Encoders are pure: the same filtered pivot and tag set always produce
 * the same bytes.
 *
 * - `pivot` / `json`: pretty JSON straight from the tree
 * - `txm`: structured XML re-export for the TXM platform
 * - `conllu`: token-per-line tabular format
 * - `hyperbase`: plain text for lexicometric analysis
 */

use crate::errors::PipelineError;
use crate::pivot::{OutputKind, PivotTree};

pub mod conllu;
pub mod hyperbase;
pub mod txm;

/// Serialize a (filtered) pivot tree into the given output kind
pub fn encode(kind: OutputKind, tree: &PivotTree) -> Result<String, PipelineError> {
    match kind {
        OutputKind::Pivot | OutputKind::Json => tree.to_json().map_err(Into::into),
        OutputKind::Txm => txm::encode(tree),
        OutputKind::Conllu => Ok(conllu::encode(tree)),
        OutputKind::Hyperbase => Ok(hyperbase::encode(tree)),
    }
}
