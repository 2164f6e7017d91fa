use std::fmt;
use std::str::FromStr;

use crate::content::ValidationError;

/// Inline styles the editor can apply to a selection.
///
/// Each style owns its delimiters. The editor wraps text with them and the
/// parser recognizes them; neither hardcodes a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Highlight,
    Code,
}

impl InlineStyle {
    pub const ALL: [InlineStyle; 6] = [
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Underline,
        InlineStyle::Strikethrough,
        InlineStyle::Highlight,
        InlineStyle::Code,
    ];

    /// Paired styles in parse precedence order. `Code` is a raw zone and is
    /// handled before any of these.
    pub(crate) const PAIRED: [InlineStyle; 5] = [
        InlineStyle::Bold,
        InlineStyle::Strikethrough,
        InlineStyle::Underline,
        InlineStyle::Highlight,
        InlineStyle::Italic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InlineStyle::Bold => "bold",
            InlineStyle::Italic => "italic",
            InlineStyle::Underline => "underline",
            InlineStyle::Strikethrough => "strikethrough",
            InlineStyle::Highlight => "highlight",
            InlineStyle::Code => "code",
        }
    }

    /// Opening and closing markers
    pub fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            InlineStyle::Bold => ("**", "**"),
            InlineStyle::Italic => ("*", "*"),
            InlineStyle::Underline => ("<u>", "</u>"),
            InlineStyle::Strikethrough => ("~~", "~~"),
            InlineStyle::Highlight => ("<mark>", "</mark>"),
            InlineStyle::Code => ("`", "`"),
        }
    }

    /// `text` surrounded by this style's markers
    pub fn wrap(self, text: &str) -> String {
        let (open, close) = self.delimiters();
        let mut out = String::with_capacity(open.len() + text.len() + close.len());
        out.push_str(open);
        out.push_str(text);
        out.push_str(close);
        out
    }

    /// HTML element this style renders as
    pub fn html_tag(self) -> &'static str {
        match self {
            InlineStyle::Bold => "strong",
            InlineStyle::Italic => "em",
            InlineStyle::Underline => "u",
            InlineStyle::Strikethrough => "del",
            InlineStyle::Highlight => "mark",
            InlineStyle::Code => "code",
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InlineStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InlineStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| ValidationError::UnknownStyle(s.to_string()))
    }
}
