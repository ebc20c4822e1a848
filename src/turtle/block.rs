//! Comment stripping and statement block splitting.
//!
//! Both passes are line-oriented heuristics rather than a full lexer: a `#`
//! starts a comment only outside a string literal and outside an `<...>` IRI
//! on its own line, and a statement ends at a `.` followed by a line break or
//! the end of input. Multi-line strings containing `#` or `.\n` are not
//! tracked.

/// Remove `#` line comments that are not inside a string literal or IRI.
pub fn strip_comments(text: &str) -> String {
    text.split('\n')
        .map(strip_line_comment)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line_comment(line: &str) -> &str {
    let mut in_string = false;
    let mut in_iri = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' if !in_iri => in_string = true,
            '<' => in_iri = true,
            '>' => in_iri = false,
            '#' if !in_iri => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Whether a `.` at this position terminates a statement.
///
/// `after` is the text following the dot. The dot terminates when the
/// whitespace run after it reaches a newline or the end of input.
fn ends_statement(after: &str) -> Option<usize> {
    let ws_len = after
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(after.len());
    let ws = &after[..ws_len];
    if ws_len == after.len() || ws.contains('\n') {
        Some(ws_len)
    } else {
        None
    }
}

/// Split comment-free text into raw statement blocks (untrimmed, unfiltered).
fn raw_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    let mut search = 0;

    while let Some(offset) = text[search..].find('.') {
        let dot = search + offset;
        match ends_statement(&text[dot + 1..]) {
            Some(ws_len) => {
                blocks.push(&text[start..dot]);
                start = dot + 1 + ws_len;
                search = start;
            }
            None => search = dot + 1,
        }
    }
    blocks.push(&text[start..]);
    blocks
}

/// Split comment-free text into trimmed statement blocks.
///
/// Empty blocks and `@prefix` declarations are dropped; prefixes are read
/// separately over the whole document.
pub fn split_blocks(text: &str) -> Vec<&str> {
    raw_blocks(text)
        .into_iter()
        .map(str::trim)
        .filter(|block| !block.is_empty() && !block.starts_with("@prefix"))
        .collect()
}
