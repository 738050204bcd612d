/*!
 * Batch pipeline: fan a batch of documents out to isolated workers,
 * fan the per-document results back into one ordered collection.
 *
 * Submodules:
 * - `request`: batch request surface and result types
 * - `orchestrator`: validation, union tag-set resolution, fan-out/fan-in
 */

pub use self::orchestrator::{ModelPolicy, Orchestrator};
pub use self::request::{
    BatchOutcome, BatchRequest, ContentKind, Document, DocumentFailure, OutputFile, OutputRequest,
};

pub mod orchestrator;
pub mod request;
