// ABOUTME: Text transformation of rich tile content.
// ABOUTME: Converts HTML to plain text for indexing.

use html5ever::tendril::TendrilSink as _;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Target mimetype for indexable text
pub const TEXT_PLAIN: &str = "text/plain";

/// Converts rich content to another mimetype
pub trait TextTransformer {
    fn transform(&self, raw: &str, mimetype: &str) -> String;
}

impl<F> TextTransformer for F
where
    F: Fn(&str, &str) -> String,
{
    fn transform(&self, raw: &str, mimetype: &str) -> String {
        self(raw, mimetype)
    }
}

/// HTML to plain text: keeps the document's text nodes, leaves out scripts,
/// styles and comments, and collapses whitespace. Other target mimetypes get
/// the input back.
#[derive(Debug, Default, Clone, Copy)]
pub struct StripTags;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "div", "dl", "dt", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p", "pre", "section", "table", "td",
    "th", "tr", "ul",
];

/// Elements whose content is never text for a reader
const SKIPPED_TAGS: &[&str] = &["noscript", "script", "style", "template"];

impl TextTransformer for StripTags {
    fn transform(&self, raw: &str, mimetype: &str) -> String {
        if mimetype != TEXT_PLAIN {
            return raw.to_string();
        }
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(raw);

        let mut text = String::with_capacity(raw.len());
        collect_text(&dom.document, &mut text);
        collapse_whitespace(&text)
    }
}

fn collect_text(handle: &Handle, out: &mut String) {
    match &handle.data {
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        NodeData::Element { name, .. } => {
            let tag = &*name.local;
            if SKIPPED_TAGS.contains(&tag) {
                return;
            }
            let block = BLOCK_TAGS.contains(&tag);
            if block {
                out.push(' ');
            }
            for child in handle.children.borrow().iter() {
                collect_text(child, out);
            }
            if block {
                out.push(' ');
            }
        }
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        _ => {}
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.replace(|c: char| c.is_control(), ""))
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
