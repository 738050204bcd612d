/*!
 * Hyperbase encoder.
 *
 * Plain text for the Hyperbase lexicometric tool: one line per token
 * group, surface forms separated by single spaces. When forms were not
 * requested, lemmas stand in; tokens carrying neither are skipped.
 * Metadata is never surfaced.
 */

use crate::pivot::PivotTree;

/// Serialize a filtered pivot tree as Hyperbase plain text
pub fn encode(tree: &PivotTree) -> String {
    let mut out = String::new();

    for group in tree.document.token_groups() {
        let words: Vec<&str> = group
            .w
            .iter()
            .filter_map(|t| t.form.as_deref().or(t.lemma.as_deref()))
            .collect();
        if words.is_empty() {
            continue;
        }
        out.push_str(&words.join(" "));
        out.push('\n');
    }

    out
}
