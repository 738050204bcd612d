/*!
 * CoNLL-U encoder.
 *
 * One ten-column line per token, one blank line after each token group.
 * Columns the pivot does not carry (syntactic heads, features) and token
 * attributes outside the requested tag set are written as `_`.
 */

use std::fmt::Write;

use crate::pivot::{PivotTree, Token};

const EMPTY_FIELD: &str = "_";

/// Serialize a filtered pivot tree as CoNLL-U
pub fn encode(tree: &PivotTree) -> String {
    let mut out = String::new();

    for (index, group) in tree.document.token_groups().into_iter().enumerate() {
        // sent_id restarts the token-group numbering for corpus tools
        let _ = writeln!(out, "# sent_id = {}", index + 1);
        if let Some(text) = &group.text {
            let _ = writeln!(out, "# text = {}", text);
        }
        for (position, token) in group.w.iter().enumerate() {
            out.push_str(&token_line(position, token));
            out.push('\n');
        }
        out.push('\n');
    }

    out
}

fn token_line(position: usize, token: &Token) -> String {
    let id = token
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| (position + 1).to_string());
    let form = token.form.as_deref().unwrap_or(EMPTY_FIELD);
    let lemma = token.lemma.as_deref().unwrap_or(EMPTY_FIELD);
    let pos = token.pos.as_deref().unwrap_or(EMPTY_FIELD);

    // ID FORM LEMMA UPOS XPOS FEATS HEAD DEPREL DEPS MISC
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
        id, form, lemma, pos, EMPTY_FIELD, EMPTY_FIELD, EMPTY_FIELD, EMPTY_FIELD, EMPTY_FIELD, EMPTY_FIELD
    )
}
