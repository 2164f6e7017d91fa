use super::InlineStyle;

/// Byte range into the parsed source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A parsed inline node. Spans are absolute offsets into the parsed string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Text outside any recognized marker.
    Text(Span),
    /// Backtick-delimited code. A raw zone: its inner text is never parsed.
    CodeSpan {
        /// Full span including backticks.
        full: Span,
        /// Content between the backticks.
        inner: Span,
    },
    /// Text wrapped in one of the paired markers.
    Styled {
        style: InlineStyle,
        /// Full span including both delimiters.
        full: Span,
        /// Parsed content between the delimiters.
        children: Vec<InlineNode>,
    },
}

impl InlineNode {
    /// The full span covered by this node
    pub fn span(&self) -> Span {
        match self {
            InlineNode::Text(span) => *span,
            InlineNode::CodeSpan { full, .. } => *full,
            InlineNode::Styled { full, .. } => *full,
        }
    }
}
