/*!
 * XML re-export for the TXM platform.
 *
 * Token groups become sequences of `<w>` elements whose attributes are
 * the requested token fields, with the surface form as element text.
 * Untokenized carry-over text is written verbatim.
 */

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::errors::PipelineError;
use crate::pivot::{PivotNode, PivotTree, Token};

/// Serialize a filtered pivot tree as TXM-ready XML
pub fn encode(tree: &PivotTree) -> Result<String, PipelineError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| PipelineError::Serialization(e.to_string()))?;

    write_node(&mut writer, &tree.document)?;

    let bytes = writer.into_inner();
    String::from_utf8(bytes).map_err(|e| PipelineError::Serialization(e.to_string()))
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &PivotNode) -> Result<(), PipelineError> {
    match node {
        PivotNode::Text(text) => writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| PipelineError::Serialization(e.to_string())),

        PivotNode::Tokens(group) => {
            for token in &group.w {
                write_token(writer, token)?;
            }
            Ok(())
        }

        PivotNode::Element(el) => {
            let mut start = BytesStart::new(el.tag.as_str());
            for (key, value) in &el.attrs {
                start.push_attribute((key.as_str(), value.as_str()));
            }

            if el.children.is_empty() {
                return writer
                    .write_event(Event::Empty(start))
                    .map_err(|e| PipelineError::Serialization(e.to_string()));
            }

            writer
                .write_event(Event::Start(start))
                .map_err(|e| PipelineError::Serialization(e.to_string()))?;
            for child in &el.children {
                write_node(writer, child)?;
            }
            writer
                .write_event(Event::End(BytesEnd::new(el.tag.as_str())))
                .map_err(|e| PipelineError::Serialization(e.to_string()))
        }
    }
}

fn write_token(writer: &mut Writer<Vec<u8>>, token: &Token) -> Result<(), PipelineError> {
    let mut start = BytesStart::new("w");
    if let Some(id) = token.id {
        start.push_attribute(("id", id.to_string().as_str()));
    }
    if let Some(lemma) = &token.lemma {
        start.push_attribute(("lemma", lemma.as_str()));
    }
    if let Some(pos) = &token.pos {
        start.push_attribute(("pos", pos.as_str()));
    }

    match &token.form {
        Some(form) => {
            writer
                .write_event(Event::Start(start))
                .map_err(|e| PipelineError::Serialization(e.to_string()))?;
            writer
                .write_event(Event::Text(BytesText::new(form)))
                .map_err(|e| PipelineError::Serialization(e.to_string()))?;
            writer
                .write_event(Event::End(BytesEnd::new("w")))
                .map_err(|e| PipelineError::Serialization(e.to_string()))
        }
        None => writer
            .write_event(Event::Empty(start))
            .map_err(|e| PipelineError::Serialization(e.to_string())),
    }
}
