use proptest::prelude::*;

/// One piece of a template: plain text or a `{key}` token.
#[derive(Debug, Clone)]
pub enum Segment {
    Text(String),
    Token(String),
}

/// A line break, either bare or CRLF.
fn arb_newline() -> impl Strategy<Value = String> {
    prop_oneof![Just("\n".to_string()), Just("\r\n".to_string())]
}

/// Text with no `{`. May contain `}`, unicode and line breaks.
pub fn arb_open_free_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => "[^{]{1,8}",
            1 => arb_newline(),
        ],
        0..8,
    )
    .prop_map(|parts| parts.concat())
}

/// Text with neither `{` nor `}`.
pub fn arb_brace_free_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => "[^{}]{1,8}",
            1 => arb_newline(),
        ],
        0..4,
    )
    .prop_map(|parts| parts.concat())
}

/// A key that opens with a letter in any script.
pub fn arb_key() -> impl Strategy<Value = String> {
    "\\p{L}[\\p{L}\\p{N}_-]{0,10}"
}

/// Well-formed template text: brace-free text interleaved with `{key}` tokens.
pub fn arb_template() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec(
        prop_oneof![
            arb_brace_free_text().prop_map(Segment::Text),
            arb_key().prop_map(Segment::Token),
        ],
        0..10,
    )
}

/// Renders segments back into template text.
pub fn render(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match s {
            Segment::Text(text) => text.clone(),
            Segment::Token(key) => format!("{{{key}}}"),
        })
        .collect()
}

/// Arbitrary text dense in braces, whitespace and line breaks.
pub fn arb_noisy_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            2 => "[{}]",
            2 => "[a-zA-Z0-9 \t]{1,4}",
            1 => "\\PC{1,4}",
            1 => arb_newline(),
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}
