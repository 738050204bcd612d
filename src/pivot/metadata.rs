/*!
 * Bibliographic and structural metadata extraction.
 *
 * Walks the parsed header of a document and produces a best-effort
 * [`Metadata`] record. The title is the only mandatory field: a document
 * that carries the TEI wrapper must have a header and a title, everything
 * else degrades to `"N/A"` or to an omitted key. Degradation is explicit
 * optional lookups, element by element, never a blanket failure catch.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::PipelineError;
use crate::markup::Element;

/// Placeholder for header fields whose element is absent
pub const ABSENT: &str = "N/A";

// @const: Whitespace run regex
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run to a single space and trim
pub(crate) fn squeeze_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

/// One cast list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    /// Identifier from the entry's xml:id attribute, `"N/A"` when absent
    pub id: String,

    /// Whitespace-normalized display text
    pub display: String,
}

/// One responsibility statement from the header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Responsibility {
    pub name: String,
    pub role: String,
}

/// Bibliographic and structural facts about one document.
///
/// Header fields are all `None` for documents without the TEI wrapper.
/// When a header is present, `title` is always set and the other four
/// fall back to `"N/A"`. `cast` and `responsibilities` are omitted keys
/// when their source structure is absent, never empty lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastMember>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<Vec<Responsibility>>,
}

/// Extracts a [`Metadata`] record from a parsed document tree
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract metadata from the parsed tree.
    ///
    /// Fails only when the document carries a TEI wrapper whose header or
    /// title is missing; every other absence degrades.
    pub fn extract(root: &Element) -> Result<Metadata, PipelineError> {
        let tei = Self::find_wrapper(root);

        let mut meta = Metadata::default();

        if let Some(tei) = tei {
            let header = tei
                .descendant_any(["teiHeader", "teiheader"])
                .ok_or_else(|| {
                    PipelineError::MalformedDocument("document header is missing".to_string())
                })?;

            let title = header.descendant("title").ok_or_else(|| {
                PipelineError::MalformedDocument("header has no title element".to_string())
            })?;
            meta.title = Some(title.text().trim().to_string());

            meta.edition = Some(
                header
                    .descendant("edition")
                    .map(|e| e.text().trim().to_string())
                    .unwrap_or_else(|| ABSENT.to_string()),
            );

            let publication_stmt = header.descendant_any(["publicationStmt", "publicationstmt"]);
            meta.publication = Some(
                publication_stmt
                    .and_then(|p| p.descendant("publisher"))
                    .map(|p| p.text().trim().to_string())
                    .unwrap_or_else(|| ABSENT.to_string()),
            );
            meta.date = Some(
                publication_stmt
                    .and_then(|p| p.descendant("date"))
                    .and_then(|d| d.attribute("when"))
                    .map(|w| w.trim().to_string())
                    .unwrap_or_else(|| ABSENT.to_string()),
            );

            meta.source = Some(
                header
                    .descendant_any(["sourceDesc", "sourcedesc"])
                    .map(|s| squeeze_whitespace(&s.text()))
                    .unwrap_or_else(|| ABSENT.to_string()),
            );

            meta.responsibilities = Self::extract_responsibilities(header);

            // Cast entries live in the body, not the header
            if let Some(body) = tei.descendant("text") {
                meta.cast = Self::extract_cast(body);
            }
        } else {
            // No document wrapper: no header facts, cast is still attempted
            // against whatever the root holds
            meta.cast = Self::extract_cast(root);
        }

        Ok(meta)
    }

    /// The top-level document element, trying both case variants
    fn find_wrapper(root: &Element) -> Option<&Element> {
        if root.name == "TEI" || root.name == "tei" {
            return Some(root);
        }
        root.descendant_any(["TEI", "tei"])
    }

    /// One record per cast entry; `None` when there is no cast list at all.
    /// An empty but present cast list yields an empty vector.
    fn extract_cast(scope: &Element) -> Option<Vec<CastMember>> {
        let cast_list = scope.descendant("castList")?;
        let members = cast_list
            .descendants("castItem")
            .into_iter()
            .map(|item| CastMember {
                id: item
                    .attribute("xml:id")
                    .map(str::to_string)
                    .unwrap_or_else(|| ABSENT.to_string()),
                display: squeeze_whitespace(&item.text()),
            })
            .collect();
        Some(members)
    }

    /// One `{name, role}` pair per responsibility statement; any structural
    /// absence (no statements, a statement missing either child) omits the
    /// whole collection
    fn extract_responsibilities(header: &Element) -> Option<Vec<Responsibility>> {
        let statements = header.descendants("respStmt");
        if statements.is_empty() {
            return None;
        }

        let mut parties = Vec::with_capacity(statements.len());
        for statement in statements {
            let name = statement.descendant("name")?;
            let role = statement.descendant("resp")?;
            parties.push(Responsibility {
                name: name.text().trim().to_string(),
                role: role.text().trim().to_string(),
            });
        }
        Some(parties)
    }
}
