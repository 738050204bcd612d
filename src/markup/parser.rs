/*!
 * Markup parser boundary.
 *
 * Streams XML events from quick-xml into the closed [`MarkupNode`] tree.
 * Whitespace-only runs between elements are dropped, comments and
 * processing instructions are skipped, CDATA is treated as text.
 * Markup that cannot be mapped into the closed shapes (stray close tag,
 * mismatched nesting, content outside a single root) is rejected here,
 * never deeper in the pipeline.
 */

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::PipelineError;
use crate::markup::node::{Element, MarkupNode};

/// Parse raw markup text into an element tree
pub fn parse_markup(text: &str) -> Result<Element, PipelineError> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(PipelineError::StructuralRewrite(
                        "content after the document root".to_string(),
                    ));
                }
                stack.push(element_from_start(&e)?);
            }

            Ok(Event::Empty(e)) => {
                let element = element_from_start(&e)?;
                attach(&mut stack, &mut root, element)?;
            }

            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let element = stack.pop().ok_or_else(|| {
                    PipelineError::StructuralRewrite(format!("stray closing tag </{}>", name))
                })?;
                if element.name != name {
                    return Err(PipelineError::StructuralRewrite(format!(
                        "mismatched closing tag </{}> for <{}>",
                        name, element.name
                    )));
                }
                attach(&mut stack, &mut root, element)?;
            }

            Ok(Event::Text(t)) => {
                let value = t
                    .unescape()
                    .map_err(|e| PipelineError::StructuralRewrite(e.to_string()))?
                    .to_string();
                push_text(&mut stack, value)?;
            }

            Ok(Event::CData(c)) => {
                let value = String::from_utf8_lossy(c.as_ref()).to_string();
                push_text(&mut stack, value)?;
            }

            // Declarations, comments, PIs and doctypes carry no content
            Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}

            Ok(Event::Eof) => break,

            Err(e) => {
                return Err(PipelineError::StructuralRewrite(format!(
                    "markup error at offset {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
        }
    }

    if let Some(open) = stack.last() {
        return Err(PipelineError::StructuralRewrite(format!(
            "unclosed element <{}>",
            open.name
        )));
    }

    root.ok_or_else(|| PipelineError::StructuralRewrite("empty document".to_string()))
}

fn element_from_start(e: &quick_xml::events::BytesStart<'_>) -> Result<Element, PipelineError> {
    let mut element = Element::new(String::from_utf8_lossy(e.name().as_ref()).to_string());

    for attr in e.attributes() {
        let attr = attr.map_err(|e| PipelineError::StructuralRewrite(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| PipelineError::StructuralRewrite(e.to_string()))?
            .to_string();
        element.attributes.insert(key, value);
    }

    Ok(element)
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), PipelineError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(MarkupNode::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(PipelineError::StructuralRewrite(
            "multiple root elements".to_string(),
        ));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut Vec<Element>, value: String) -> Result<(), PipelineError> {
    if value.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(MarkupNode::Text(value));
            Ok(())
        }
        None => Err(PipelineError::StructuralRewrite(
            "text outside the document root".to_string(),
        )),
    }
}
