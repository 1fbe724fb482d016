//! Lightweight post markup.
//!
//! `*bold*`, `/italic/`, `_underline_`, `~strike~`, `!spoiler!`, `` `mono` ``
//! and `#hashtag` are turned into [`Span`]s over the stripped text. Markers
//! do not nest: the first marker to close wins and its content is taken
//! verbatim. Offsets and lengths count characters, not bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Span, SpanType};

static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\*(?P<bold>.+?)\*",
        r"|~(?P<strike>.+?)~",
        r"|!(?P<spoiler>.+?)!",
        r"|`(?P<mono>.+?)`",
        r"|_(?P<underline>.+?)_",
        r"|/(?P<italic>.+?)/",
        r"|(?P<hashtag>#[A-Za-z0-9_]+)",
    ))
    .expect("markup pattern compiles")
});

const GROUPS: [(&str, SpanType); 7] = [
    ("bold", SpanType::Bold),
    ("strike", SpanType::Strikethrough),
    ("spoiler", SpanType::Spoiler),
    ("mono", SpanType::Monospace),
    ("underline", SpanType::Underline),
    ("italic", SpanType::Italic),
    ("hashtag", SpanType::Hashtag),
];

/// Parse markup into spans and the plain text they index.
///
/// The returned text is trimmed; span offsets account for the trim.
pub fn parse(text: &str) -> (Vec<Span>, String) {
    let mut spans = Vec::new();
    let mut plain = String::with_capacity(text.len());
    let mut plain_chars = 0usize;
    let mut last = 0usize;

    for caps in MARKUP.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some((group, kind)) = GROUPS
            .iter()
            .find_map(|(name, kind)| caps.name(name).map(|m| (m, *kind)))
        else {
            continue;
        };

        let before = &text[last..whole.start()];
        plain.push_str(before);
        plain_chars += before.chars().count();

        let content = group.as_str();
        let length = content.chars().count();
        spans.push(Span {
            kind,
            offset: plain_chars,
            length,
            tag: (kind == SpanType::Hashtag).then(|| content.to_string()),
        });

        plain.push_str(content);
        plain_chars += length;
        last = whole.end();
    }
    plain.push_str(&text[last..]);

    let leading = plain.chars().take_while(|c| c.is_whitespace()).count();
    for span in &mut spans {
        span.offset = span.offset.saturating_sub(leading);
    }

    (spans, plain.trim().to_string())
}
