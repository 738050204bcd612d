use indexmap::IndexMap;

// @module: Closed markup tree shapes

/// One node of the parsed markup tree: either an element or a text run.
///
/// The variant set is closed on purpose. The parser decides the shape of
/// every node once, and consumers match exhaustively instead of probing
/// types at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNode {
    /// An element with a name, attributes and ordered children
    Element(Element),
    /// A raw text run
    Text(String),
}

impl MarkupNode {
    /// The element inside this node, if it is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(el) => Some(el),
            MarkupNode::Text(_) => None,
        }
    }
}

/// A markup element: tag name, ordered attribute map, ordered children
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    // @field: Tag name as written in the source
    pub name: String,

    // @field: Attributes in source order
    pub attributes: IndexMap<String, String>,

    // @field: Children in source order
    pub children: Vec<MarkupNode>,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new<S: Into<String>>(name: S) -> Self {
        Element {
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// First direct child element with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find_map(|c| match c {
            MarkupNode::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    /// First descendant element with the given name, depth-first
    pub fn descendant(&self, name: &str) -> Option<&Element> {
        for child in &self.children {
            if let MarkupNode::Element(el) = child {
                if el.name == name {
                    return Some(el);
                }
                if let Some(found) = el.descendant(name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// First descendant element matching either of two name variants.
    /// The first variant wins when both are present.
    pub fn descendant_any(&self, names: [&str; 2]) -> Option<&Element> {
        self.descendant(names[0]).or_else(|| self.descendant(names[1]))
    }

    /// All descendant elements with the given name, in document order
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if let MarkupNode::Element(el) = child {
                if el.name == name {
                    found.push(el);
                }
                el.collect_descendants(name, found);
            }
        }
    }

    /// Concatenated text of every descendant text run, in document order
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.append_text(&mut out);
        out
    }

    fn append_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                MarkupNode::Text(t) => out.push_str(t),
                MarkupNode::Element(el) => el.append_text(out),
            }
        }
    }
}
