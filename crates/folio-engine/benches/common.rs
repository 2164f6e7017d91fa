// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use folio_engine::content::{Block, Document, HeadingLevel};

#[allow(dead_code)]
pub fn generate_post(sections: usize) -> Document {
    let mut blocks = Vec::with_capacity(sections * 6);

    for section in 0..sections {
        blocks.push(Block::heading(HeadingLevel::H2, format!("Section {section}")));
        blocks.push(Block::paragraph(
            "Some paragraph content with **bold**, *italic* and `code` spans. \
             This helps create realistic inline markup for benchmarking.",
        ));
        blocks.push(Block::List {
            text: "First item\nSecond <mark>highlighted</mark> item\n\nThird ~~struck~~ item"
                .to_string(),
        });
        blocks.push(Block::Quote {
            text: "A quote with <u>underlined</u> words & escapes <here>.".to_string(),
        });
        if section % 3 == 0 {
            blocks.push(Block::Code {
                text: "fn benchmark_function() {\n    let value = 42;\n    println!(\"{}\", value);\n}"
                    .to_string(),
            });
        }
        blocks.push(Block::Link {
            text: format!("Reference {section}"),
            target: Some(format!("https://example.com/refs/{section}")),
        });
    }

    Document::new(blocks)
}

#[allow(dead_code)]
pub fn generate_inline_heavy(repeats: usize) -> String {
    "plain **bold *nested italic* bold** `code **not bold**` <mark>hi</mark> ~~gone~~ "
        .repeat(repeats)
}
