//! # HTML rendering
//!
//! One renderer for every display path: the author's live preview, the public
//! post view and the HTML body of a contact reply all call [`render_with`].
//!
//! Rendering is total. Every block produces output, unknown kinds fall back to
//! a paragraph, and an empty document renders as nothing (or the configured
//! placeholder).
//!
//! All text is HTML-escaped. The only markup honored is the editor's own inline
//! markers (see [`crate::inline`]), and only in paragraph, heading, quote and
//! list-item text. Link and image targets go through [`url::safe_target`].

pub mod url;

use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};

use crate::content::{Block, Document};
use crate::inline::{InlineNode, parse_inline};

pub use url::safe_target;

/// Knobs for the shared renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Interpret the editor's inline markers. When off, text is only escaped.
    pub inline_markup: bool,
    /// Text shown for a document with no blocks, as `<p class="empty">`.
    pub empty_placeholder: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            inline_markup: true,
            empty_placeholder: None,
        }
    }
}

/// Renders `document` with default options.
pub fn render(document: &Document) -> String {
    render_with(document, &RenderOptions::default())
}

/// Renders `document`, one block per line with no trailing newline.
pub fn render_with(document: &Document, options: &RenderOptions) -> String {
    let mut out = String::new();

    if document.is_empty() {
        if let Some(placeholder) = &options.empty_placeholder {
            out.push_str("<p class=\"empty\">");
            encode_text_to_string(placeholder, &mut out);
            out.push_str("</p>");
        }
        return out;
    }

    for (i, block) in document.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_block(&mut out, block, options);
    }
    out
}

/// Appends the HTML for a single block to `out`.
pub fn render_block(out: &mut String, block: &Block, options: &RenderOptions) {
    match block {
        Block::Paragraph { text } => wrap_text(out, "p", text, options),
        Block::Heading { level, text } => {
            let tag = match level.rank() {
                1 => "h1",
                2 => "h2",
                _ => "h3",
            };
            wrap_text(out, tag, text, options);
        }
        Block::Quote { text } => wrap_text(out, "blockquote", text, options),
        Block::Code { text } => {
            out.push_str("<pre><code>");
            encode_text_to_string(text, out);
            out.push_str("</code></pre>");
        }
        Block::List { text } => render_list(out, "ul", text, options),
        Block::OrderedList { text } => render_list(out, "ol", text, options),
        Block::Link { text, target } => {
            out.push_str("<p><a href=\"");
            encode_double_quoted_attribute_to_string(safe_target(target.as_deref()), out);
            out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
            encode_text_to_string(text, out);
            out.push_str("</a></p>");
        }
        Block::Image { text, target } => {
            out.push_str("<figure><img src=\"");
            encode_double_quoted_attribute_to_string(safe_target(target.as_deref()), out);
            out.push_str("\" alt=\"");
            encode_double_quoted_attribute_to_string(text, out);
            out.push_str("\">");
            if !text.is_empty() {
                out.push_str("<figcaption>");
                encode_text_to_string(text, out);
                out.push_str("</figcaption>");
            }
            out.push_str("</figure>");
        }
        Block::Unrecognized(unknown) => wrap_text(out, "p", unknown.text(), options),
    }
}

/// Non-blank, trimmed lines of a list block's text.
pub fn list_items(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|item| !item.is_empty())
}

fn render_list(out: &mut String, tag: &str, text: &str, options: &RenderOptions) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    for item in list_items(text) {
        wrap_text(out, "li", item, options);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn wrap_text(out: &mut String, tag: &str, text: &str, options: &RenderOptions) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    push_text(out, text, options);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn push_text(out: &mut String, text: &str, options: &RenderOptions) {
    if options.inline_markup {
        push_inline(out, text, &parse_inline(text));
    } else {
        encode_text_to_string(text, out);
    }
}

fn push_inline(out: &mut String, src: &str, nodes: &[InlineNode]) {
    for node in nodes {
        match node {
            InlineNode::Text(span) => {
                encode_text_to_string(span.slice(src), out);
            }
            InlineNode::CodeSpan { inner, .. } => {
                out.push_str("<code>");
                encode_text_to_string(inner.slice(src), out);
                out.push_str("</code>");
            }
            InlineNode::Styled {
                style, children, ..
            } => {
                let tag = style.html_tag();
                out.push('<');
                out.push_str(tag);
                out.push('>');
                push_inline(out, src, children);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
