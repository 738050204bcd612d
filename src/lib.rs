/*!
 * # pivotier - TEI to annotated corpus formats
 *
 * A Rust library for converting scholarly text editions encoded in a
 * TEI-like XML dialect into a canonical annotated pivot tree, and for
 * rendering that pivot into the formats consumed by corpus-analysis
 * tools.
 *
 * ## Features
 *
 * - Parse TEI-like markup into a closed generic tree
 * - Extract bibliographic metadata with graceful degradation
 * - Tokenize and tag every text run through an external tagger
 *   (TreeTagger subprocess, or a deterministic mock)
 * - Filter the pivot per output down to a requested token attribute set
 * - Render json, TXM XML, CoNLL-U and Hyperbase outputs in one pass
 * - Batch processing with bounded parallel workers and ordered results
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `markup`: Markup tree and parser boundary
 * - `pivot`: Canonical pivot tree:
 *   - `pivot::builder`: Markup to pivot transformation
 *   - `pivot::metadata`: Header metadata extraction
 *   - `pivot::filter`: Tag-set reduction for per-output views
 * - `tagger`: Tokenizer/tagger clients (TreeTagger, mock)
 * - `encoders`: Per-format serialization of filtered pivots
 * - `pipeline`: Batch orchestration (fan-out/fan-in)
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod encoders;
pub mod errors;
pub mod file_utils;
pub mod markup;
pub mod pipeline;
pub mod pivot;
pub mod tagger;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, PipelineError, TaggerError};
pub use pipeline::{BatchOutcome, BatchRequest, Document, Orchestrator, OutputFile};
pub use pivot::{OutputKind, PivotBuilder, PivotTree, Tag, TagSet};
pub use tagger::{Tagger, TaggerRegistry};
