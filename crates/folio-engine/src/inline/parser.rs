use std::ops::Range;

use super::{
    kinds::InlineStyle,
    scanner::Scanner,
    types::{InlineNode, Span},
};

/// For each paired style, the position from which its closing marker is known
/// to be missing in the current range.
type Unclosed = [Option<usize>; InlineStyle::PAIRED.len()];

/// Parses block text into a sequence of [`InlineNode`]s covering all of `s`.
///
/// # Raw Zone Precedence
/// Code spans are checked first and suppress all other parsing inside them.
/// Paired markers are tried in [`InlineStyle::PAIRED`] order; an unclosed or
/// empty marker is plain text.
pub fn parse_inline(s: &str) -> Vec<InlineNode> {
    parse_range(s, 0..s.len())
}

fn parse_range(src: &str, range: Range<usize>) -> Vec<InlineNode> {
    let mut sc = Scanner::new(src, range);
    let mut unclosed: Unclosed = [None; InlineStyle::PAIRED.len()];
    let mut out = vec![];
    let mut text_start = sc.pos();

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while !sc.is_done() {
        let node = match code_span(&mut sc) {
            Some(node) => Some(node),
            None => styled(src, &mut sc, &mut unclosed),
        };
        if let Some(node) = node {
            let span = node.span();
            flush_text(&mut out, text_start, span.start);
            text_start = span.end;
            out.push(node);
            continue;
        }
        sc.step();
    }

    flush_text(&mut out, text_start, sc.pos());
    out
}

/// Parses a code span at the scanner, moving past it on success.
fn code_span(sc: &mut Scanner<'_>) -> Option<InlineNode> {
    let (tick, _) = InlineStyle::Code.delimiters();
    let start = sc.pos();
    let mut ahead = *sc;
    if !ahead.eat(tick) {
        return None;
    }
    let inner_start = ahead.pos();
    let inner_end = ahead.find(tick)?;
    ahead.seek(inner_end);
    ahead.eat(tick);
    *sc = ahead;

    Some(InlineNode::CodeSpan {
        full: Span {
            start,
            end: sc.pos(),
        },
        inner: Span {
            start: inner_start,
            end: inner_end,
        },
    })
}

/// Parses any paired style at the scanner, moving past it on success.
///
/// Content between the delimiters is parsed recursively. A failed closer
/// search is recorded in `unclosed`, and later openers of that style in the
/// same range are not searched again.
fn styled(src: &str, sc: &mut Scanner<'_>, unclosed: &mut Unclosed) -> Option<InlineNode> {
    for (slot, style) in InlineStyle::PAIRED.into_iter().enumerate() {
        let (open, close) = style.delimiters();
        let start = sc.pos();
        let mut ahead = *sc;
        if !ahead.eat(open) {
            continue;
        }
        let inner_start = ahead.pos();
        if unclosed[slot].is_some_and(|from| inner_start >= from) {
            continue;
        }

        let Some(inner_end) = find_close(ahead, style, close) else {
            unclosed[slot] = Some(inner_start);
            continue;
        };
        if inner_end > inner_start && flanks(style, &src[inner_start..inner_end]) {
            ahead.seek(inner_end);
            ahead.eat(close);
            *sc = ahead;
            return Some(InlineNode::Styled {
                style,
                full: Span {
                    start,
                    end: sc.pos(),
                },
                children: parse_range(src, inner_start..inner_end),
            });
        }
    }

    None
}

/// Offset of the closing delimiter for `style`.
///
/// Code spans are skipped whole. For italics a `**` pair is never taken as
/// the closing `*`, so `*a **b** c*` nests.
fn find_close(mut sc: Scanner<'_>, style: InlineStyle, close: &str) -> Option<usize> {
    while !sc.is_done() {
        if code_span(&mut sc).is_some() {
            continue;
        }
        if style == InlineStyle::Italic && sc.eat("**") {
            continue;
        }
        if sc.at(close) {
            return Some(sc.pos());
        }
        sc.step();
    }
    None
}

/// Italic content must not start or end with whitespace, so `2 * 3 * 4`
/// stays plain text.
fn flanks(style: InlineStyle, inner: &str) -> bool {
    if style != InlineStyle::Italic {
        return true;
    }
    let first = inner.chars().next();
    let last = inner.chars().next_back();
    !first.is_some_and(char::is_whitespace) && !last.is_some_and(char::is_whitespace)
}
