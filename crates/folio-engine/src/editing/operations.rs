use std::ops::Range;

use crate::content::{Block, BlockKind, Document, HeadingLevel, ValidationError};
use crate::inline::InlineStyle;

use super::EditError;

/// Wraps `buffer[selection]` in the markers for `style`.
///
/// Offsets are byte offsets. An empty selection returns the buffer unchanged.
/// A selection that is reversed, runs past the end, or splits a character is
/// rejected rather than clamped.
pub fn apply_inline_style(
    buffer: &str,
    selection: Range<usize>,
    style: InlineStyle,
) -> Result<String, EditError> {
    let Range { start, end } = selection;
    if start > end
        || end > buffer.len()
        || !buffer.is_char_boundary(start)
        || !buffer.is_char_boundary(end)
    {
        return Err(EditError::InvalidSelection {
            start,
            end,
            len: buffer.len(),
        });
    }
    if start == end {
        return Ok(buffer.to_string());
    }

    let mut out = String::with_capacity(buffer.len() + 16);
    out.push_str(&buffer[..start]);
    out.push_str(&style.wrap(&buffer[start..end]));
    out.push_str(&buffer[end..]);
    Ok(out)
}

/// Returns a copy of `document` with one block built from `buffer` appended.
///
/// See [`build_block`] for the rules; a rejected block leaves the caller's
/// document as it was.
pub fn append_block(
    document: &Document,
    kind: BlockKind,
    buffer: &str,
    level: Option<u8>,
    target: Option<&str>,
) -> Result<Document, EditError> {
    let block = build_block(kind, buffer, level, target)?;
    Ok(document.with_block(block))
}

/// Builds a block of `kind` from the editor's input.
///
/// - text is trimmed; for code only trailing whitespace and leading blank lines
///   are dropped so indentation survives
/// - empty text is rejected except for links and images, which get a
///   placeholder caption instead
/// - headings need a level in 1..=3
/// - a blank link or image target is stored as no target
///
/// `level` is ignored for non-headings and `target` for kinds without one.
pub fn build_block(
    kind: BlockKind,
    buffer: &str,
    level: Option<u8>,
    target: Option<&str>,
) -> Result<Block, ValidationError> {
    let text = buffer.trim();

    if kind.has_target() {
        let target = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let text = if text.is_empty() {
            kind.placeholder_caption().unwrap_or_default()
        } else {
            text
        }
        .to_string();

        return Ok(match kind {
            BlockKind::Image => Block::Image { text, target },
            _ => Block::Link { text, target },
        });
    }

    if text.is_empty() {
        return Err(ValidationError::EmptyText { kind });
    }

    let block = match kind {
        BlockKind::Heading => {
            let level = level.ok_or(ValidationError::MissingHeadingLevel)?;
            Block::heading(HeadingLevel::try_from(level)?, text)
        }
        BlockKind::Code => Block::Code {
            text: code_text(buffer).to_string(),
        },
        BlockKind::Quote => Block::Quote {
            text: text.to_string(),
        },
        BlockKind::List => Block::List {
            text: text.to_string(),
        },
        BlockKind::OrderedList => Block::OrderedList {
            text: text.to_string(),
        },
        BlockKind::Paragraph | BlockKind::Link | BlockKind::Image => Block::paragraph(text),
    };
    Ok(block)
}

/// Returns a copy of `document` without the block at `index`.
pub fn remove_block(document: &Document, index: usize) -> Result<Document, EditError> {
    if index >= document.len() {
        return Err(EditError::IndexOutOfRange {
            index: isize::try_from(index).unwrap_or(isize::MAX),
            len: document.len(),
        });
    }
    Ok(document.without_block(index))
}

/// Checks a signed, user-supplied index against a document length.
pub fn resolve_index(index: isize, len: usize) -> Result<usize, EditError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(EditError::IndexOutOfRange { index, len })
}

fn code_text(buffer: &str) -> &str {
    let mut rest = buffer.trim_end();
    while let Some((line, tail)) = rest.split_once('\n') {
        if !line.trim().is_empty() {
            break;
        }
        rest = tail;
    }
    rest
}
