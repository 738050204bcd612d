/*!
 * Canonical pivot tree: the annotated intermediate representation
 * shared by every output encoder.
 *
 * Submodules:
 * - `tags`: token attribute vocabulary and output kinds
 * - `tree`: pivot tree data model and its JSON shape
 * - `metadata`: bibliographic metadata record and extractor
 * - `builder`: markup tree to pivot tree transformation
 * - `filter`: reduction of a pivot tree to a requested tag subset
 */

pub use self::builder::PivotBuilder;
pub use self::filter::filter_tree;
pub use self::metadata::{CastMember, Metadata, MetadataExtractor, Responsibility};
pub use self::tags::{OutputKind, Tag, TagSet};
pub use self::tree::{PivotElement, PivotNode, PivotTree, Token, TokenGroup};

pub mod builder;
pub mod filter;
pub mod metadata;
pub mod tags;
pub mod tree;
