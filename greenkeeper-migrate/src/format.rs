//! Canonical formatting for files written back to repositories.

use pulldown_cmark::{Event, Parser, Tag};
use std::ops::Range;

/// Normalizes Markdown text.
///
/// - Line endings become `\n`.
/// - Leading blank lines are dropped and runs of blank lines collapse to one.
/// - Trailing whitespace is removed, except a hard line break (two or more
///   spaces).
/// - The output ends with exactly one newline.
///
/// Code blocks, fenced or indented, are copied verbatim.
#[must_use]
pub fn format_markdown(text: &str) -> String {
    let code_blocks = code_block_ranges(text);
    let in_code_block = |line: &Range<usize>| {
        code_blocks
            .iter()
            .any(|block| line.start < block.end && block.start < line.end)
    };

    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;
    let mut offset = 0;

    for raw in text.split_inclusive('\n') {
        let span = offset..offset + raw.len();
        offset = span.end;

        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let verbatim = in_code_block(&span);

        if !verbatim && line.trim().is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }

        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }

        out.push_str(if verbatim { line } else { trim_line_end(line) });
        out.push('\n');
    }

    out
}

/// Byte ranges of every code block in `text`.
fn code_block_ranges(text: &str) -> Vec<Range<usize>> {
    Parser::new(text)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::CodeBlock(_)) => Some(range),
            _ => None,
        })
        .collect()
}

fn trim_line_end(line: &str) -> &str {
    let content = line.trim_end();
    let trailing = &line[content.len()..];
    if trailing.len() >= 2 && trailing.bytes().all(|b| b == b' ') {
        line
    } else {
        content
    }
}

/// Normalizes YAML text.
///
/// Line endings become `\n`, trailing whitespace is removed from every line
/// and the document ends with exactly one newline.
#[must_use]
pub fn format_yaml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let content_len = out.trim_end_matches('\n').len();
    out.truncate(content_len);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
