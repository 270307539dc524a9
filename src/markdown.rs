//! Constrained Markdown rendering for catalog README payloads.
//!
//! The grammar is intentionally small: headings `#`..`###`, strong
//! (`**`/`__`), emphasis (`*`/`_`), inline code, fenced code blocks, links,
//! and paragraphs with hard line breaks. Anything outside the grammar is
//! treated as plain text and escaped. Raw HTML in the input never survives:
//! every character reaching the output passes through the escaper exactly
//! once.

use crate::html::{Fragment, is_safe_url};

/// Inline construct openers. All ASCII, so byte offsets from `find` are
/// always valid slice boundaries.
const DELIMITERS: [char; 5] = ['`', '*', '_', '[', '\n'];

/// Render constrained Markdown to an HTML fragment.
///
/// The input is scanned in a single pass over its lines: fenced code blocks
/// and headings are recognized first, everything else accumulates into
/// paragraphs whose inline constructs are resolved by `render_inline`.
/// Unterminated delimiters (a lone `**`, an unclosed fence) degrade to
/// literal text rather than swallowing the rest of the document. Empty input
/// yields an empty fragment.
pub fn render(markdown: &str) -> Fragment {
    let mut out = Fragment::new();
    let lines: Vec<&str> = markdown.lines().collect();
    let mut paragraph: Vec<&str> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if line.starts_with("```") {
            // Only a fence with a matching close is a code block; otherwise
            // the opener reads as paragraph text.
            if let Some(close) = (i + 1..lines.len()).find(|&j| lines[j].starts_with("```")) {
                flush_paragraph(&mut out, &mut paragraph);
                push_code_block(&mut out, &lines[i + 1..close]);
                i = close + 1;
                continue;
            }
            paragraph.push(line);
            i += 1;
            continue;
        }

        if let Some((level, text)) = heading_line(line) {
            flush_paragraph(&mut out, &mut paragraph);
            out.markup(&format!("<h{level}>"));
            render_inline(&mut out, text);
            out.markup(&format!("</h{level}>\n"));
            i += 1;
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
        } else {
            paragraph.push(line);
        }
        i += 1;
    }
    flush_paragraph(&mut out, &mut paragraph);
    out
}

/// Heading level and text for `# `/`## `/`### ` lines. Four or more hashes,
/// or a hash without a following space, is not a heading.
fn heading_line(line: &str) -> Option<(usize, &str)> {
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some((level, rest.trim()));
        }
    }
    None
}

fn flush_paragraph(out: &mut Fragment, paragraph: &mut Vec<&str>) {
    if paragraph.is_empty() {
        return;
    }
    out.markup("<p>");
    let text = paragraph.join("\n");
    render_inline(out, &text);
    out.markup("</p>\n");
    paragraph.clear();
}

fn push_code_block(out: &mut Fragment, lines: &[&str]) {
    out.markup("<pre><code>");
    out.text(&lines.join("\n"));
    out.markup("</code></pre>\n");
}

// ---------------------------------------------------------------------------
// Inline constructs
// ---------------------------------------------------------------------------

/// Resolve inline constructs in `text` and append them to `out`.
///
/// Construct content is escaped text, not re-parsed, so constructs do not
/// nest and nothing is escaped twice.
fn render_inline(out: &mut Fragment, text: &str) {
    let mut rest = text;
    while !rest.is_empty() {
        if !rest.starts_with(DELIMITERS) {
            // Longest plain run up to the next candidate delimiter.
            let next = rest.find(DELIMITERS).unwrap_or(rest.len());
            out.text(&rest[..next]);
            rest = &rest[next..];
            continue;
        }

        if let Some(after) = rest.strip_prefix('\n') {
            out.markup("<br>\n");
            rest = after;
            continue;
        }

        if let Some(consumed) = code_span(out, rest)
            .or_else(|| strong_or_emphasis(out, rest))
            .or_else(|| link(out, rest))
        {
            rest = &rest[consumed..];
            continue;
        }

        // Unterminated or unmatched delimiter: emit it literally. The head
        // is one of the ASCII delimiters, so a one-byte step is safe.
        out.text(&rest[..1]);
        rest = &rest[1..];
    }
}

/// Try a backtick code span at the head of `rest`. Returns the number of
/// bytes consumed, or `None` when no closed, non-empty span starts here.
fn code_span(out: &mut Fragment, rest: &str) -> Option<usize> {
    let inner = rest.strip_prefix('`')?;
    let end = inner.find('`').filter(|&end| end > 0)?;
    out.markup("<code>");
    out.text(&inner[..end]);
    out.markup("</code>");
    Some(1 + end + 1)
}

/// Try `**`/`__` (strong) then `*`/`_` (emphasis) at the head of `rest`.
/// Empty content does not count as a construct, so a stray `**` stays
/// literal instead of becoming an empty element.
fn strong_or_emphasis(out: &mut Fragment, rest: &str) -> Option<usize> {
    for delim in ["**", "__"] {
        if let Some(inner) = rest.strip_prefix(delim)
            && let Some(end) = inner.find(delim).filter(|&end| end > 0)
        {
            out.markup("<strong>");
            out.text(&inner[..end]);
            out.markup("</strong>");
            return Some(2 + end + 2);
        }
    }
    for delim in ['*', '_'] {
        if let Some(inner) = rest.strip_prefix(delim)
            && let Some(end) = inner.find(delim).filter(|&end| end > 0)
        {
            out.markup("<em>");
            out.text(&inner[..end]);
            out.markup("</em>");
            return Some(1 + end + 1);
        }
    }
    None
}

/// Try a `[text](url)` link at the head of `rest`. A link whose url falls
/// outside the allow-list renders as its text alone, with no anchor, so a
/// hostile url cannot ride into the document. Returns the number of bytes
/// consumed.
fn link(out: &mut Fragment, rest: &str) -> Option<usize> {
    if !rest.starts_with('[') {
        return None;
    }
    let close_bracket = rest.find(']')?;
    let after_paren = rest[close_bracket + 1..].strip_prefix('(')?;
    let close_paren = find_balanced_close(after_paren)?;

    let label = &rest[1..close_bracket];
    let url = after_paren[..close_paren].trim();

    if is_safe_url(url) {
        out.markup("<a href=\"");
        out.text(url);
        out.markup("\" target=\"_blank\" rel=\"noopener noreferrer\">");
        out.text(label);
        out.markup("</a>");
    } else {
        out.text(label);
    }
    Some(close_bracket + 2 + close_paren + 1)
}

/// Byte offset of the `)` closing a link destination, skipping balanced
/// inner parentheses so urls like `.../Rust_(language)` survive intact.
fn find_balanced_close(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}
