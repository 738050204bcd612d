/*!
 * Generic markup tree and parser boundary.
 *
 * The parser turns raw XML-like text into a closed tree of [`MarkupNode`]
 * values. Everything downstream (metadata extraction, pivot building)
 * matches exhaustively over that closed shape; markup the parser cannot
 * map into it is rejected at this boundary.
 */

pub use self::node::{Element, MarkupNode};
pub use self::parser::parse_markup;

pub mod node;
pub mod parser;
