use crate::error::ArchiveError;
use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

/// A parsed, mutable HTML document
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parses a response body; invalid UTF-8 is replaced, not rejected
    pub fn parse(body: &[u8]) -> Result<Self, ArchiveError> {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut &body[..])
            .map_err(|source| ArchiveError::Markup { source })?;

        Ok(Self { dom })
    }

    /// The document node, parent of the whole tree
    pub fn root(&self) -> &Handle {
        &self.dom.document
    }

    /// Serializes the (possibly rewritten) tree back to HTML
    pub fn serialize(&self) -> Result<Vec<u8>, ArchiveError> {
        let mut out = Vec::new();
        let document: SerializableHandle = self.dom.document.clone().into();
        serialize(&mut out, &document, SerializeOpts::default())
            .map_err(|source| ArchiveError::Markup { source })?;
        Ok(out)
    }

    /// Whitespace-normalized text of the first `<title>` element
    pub fn title(&self) -> Option<String> {
        let mut stack = vec![self.dom.document.clone()];
        while let Some(node) = stack.pop() {
            if let NodeData::Element { ref name, .. } = node.data {
                if &*name.local == "title" {
                    let title = text_of(&node);
                    ::log::trace!("Page title: {:?}", title);
                    return (!title.is_empty()).then_some(title);
                }
            }
            stack.extend(node.children.borrow().iter().rev().cloned());
        }
        None
    }
}

fn text_of(node: &Handle) -> String {
    let mut text = String::new();
    for child in node.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            text.push_str(&contents.borrow());
            text.push(' ');
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
