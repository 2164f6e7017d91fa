use folio_engine::content::{Block, BlockKind, Document, HeadingLevel, ValidationError};
use folio_engine::editing::{EditError, append_block, apply_inline_style, remove_block, resolve_index};
use folio_engine::inline::InlineStyle;
use folio_engine::render::render;
use rstest::rstest;

fn documents() -> Vec<Document> {
    vec![
        Document::default(),
        Document::new(vec![Block::paragraph("only")]),
        Document::new(vec![
            Block::heading(HeadingLevel::H1, "Title"),
            Block::Code {
                text: "  x".to_string(),
            },
            Block::Image {
                text: String::new(),
                target: Some("/a.png".to_string()),
            },
        ]),
    ]
}

/// Appending then removing the new last block renders the original document
#[rstest]
fn append_then_remove_is_identity(
    #[values(
        BlockKind::Paragraph,
        BlockKind::Heading,
        BlockKind::Quote,
        BlockKind::Code,
        BlockKind::List,
        BlockKind::OrderedList,
        BlockKind::Link,
        BlockKind::Image
    )]
    kind: BlockKind,
    #[values("plain", "**styled** text", "  padded  ", "one\ntwo")] text: &str,
    #[values(Some("https://example.com"), None)] target: Option<&str>,
) {
    for doc in documents() {
        let appended = append_block(&doc, kind, text, Some(2), target).unwrap();
        assert_eq!(appended.len(), doc.len() + 1);

        let restored = remove_block(&appended, doc.len()).unwrap();
        assert_eq!(render(&restored), render(&doc));
        assert_eq!(restored, doc);
    }
}

/// Blank text is rejected for every kind without a target
#[rstest]
fn blank_text_rejected(
    #[values(
        BlockKind::Paragraph,
        BlockKind::Heading,
        BlockKind::Quote,
        BlockKind::Code,
        BlockKind::List,
        BlockKind::OrderedList
    )]
    kind: BlockKind,
    #[values("", " ", "\n\n", "\t \r\n")] text: &str,
) {
    for doc in documents() {
        let before = doc.clone();
        let err = append_block(&doc, kind, text, Some(1), None).unwrap_err();

        assert_eq!(err, EditError::Validation(ValidationError::EmptyText { kind }));
        assert_eq!(doc, before);
    }
}

#[rstest]
fn targeted_kinds_accept_blank_text(
    #[values(BlockKind::Link, BlockKind::Image)] kind: BlockKind,
    #[values(Some("/x"), Some("  "), None)] target: Option<&str>,
) {
    let doc = append_block(&Document::default(), kind, "", None, target).unwrap();
    assert_eq!(doc.get(0).map(Block::text), kind.placeholder_caption());
    assert_eq!(doc.get(0).and_then(Block::target), target.filter(|t| !t.trim().is_empty()));
}

#[test]
fn bold_prefix_of_buffer() {
    assert_eq!(
        apply_inline_style("hello world", 0..5, InlineStyle::Bold).unwrap(),
        "**hello** world"
    );
}

#[rstest]
fn empty_selection_changes_nothing(
    #[values(
        InlineStyle::Bold,
        InlineStyle::Italic,
        InlineStyle::Underline,
        InlineStyle::Strikethrough,
        InlineStyle::Highlight,
        InlineStyle::Code
    )]
    style: InlineStyle,
    #[values(0, 3, 11)] at: usize,
) {
    assert_eq!(
        apply_inline_style("hello world", at..at, style).unwrap(),
        "hello world"
    );
}

/// Whatever style is applied, the rendered text carries the matching element
#[rstest]
#[case(InlineStyle::Bold, "<strong>world</strong>")]
#[case(InlineStyle::Italic, "<em>world</em>")]
#[case(InlineStyle::Underline, "<u>world</u>")]
#[case(InlineStyle::Strikethrough, "<del>world</del>")]
#[case(InlineStyle::Highlight, "<mark>world</mark>")]
#[case(InlineStyle::Code, "<code>world</code>")]
fn styled_buffer_renders_element(#[case] style: InlineStyle, #[case] element: &str) {
    let buffer = apply_inline_style("hello world", 6..11, style).unwrap();
    let doc = append_block(&Document::default(), BlockKind::Paragraph, &buffer, None, None).unwrap();

    assert_eq!(render(&doc), format!("<p>hello {element}</p>"));
}

#[test]
fn remove_past_end_and_negative_index() {
    for doc in documents() {
        let len = doc.len();
        assert_eq!(
            remove_block(&doc, len),
            Err(EditError::IndexOutOfRange {
                index: len as isize,
                len
            })
        );
        assert_eq!(
            resolve_index(-1, len),
            Err(EditError::IndexOutOfRange { index: -1, len })
        );
    }
}

#[test]
fn remove_each_position() {
    let doc: Document = ["a", "b", "c"].into_iter().map(Block::paragraph).collect();
    let expected = [["b", "c"], ["a", "c"], ["a", "b"]];

    for (index, remaining) in expected.iter().enumerate() {
        let shorter = remove_block(&doc, index).unwrap();
        let texts: Vec<_> = shorter.iter().map(Block::text).collect();
        assert_eq!(texts, remaining);
    }
}
