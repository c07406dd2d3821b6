//! Positional scans over a line buffer.
//!
//! These run independently of the value decoders and only answer "which
//! lines does each record occupy". A record that cannot be isolated on its
//! own lines is left out; the store edits such records by rewriting the
//! whole file.

use log::debug;
use serde_json::Value;

use super::index::LineSpan;
use crate::codec::{json, script};

/// Lines holding the root array's brackets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArraySpan {
    pub open: usize,
    pub close: usize,
}

/// How an object is separated from the element after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// No comma: last element
    None,
    /// Comma right after the closing brace
    Inline,
    /// Comma at the start of the next non-blank line
    NextLine,
}

/// One object isolated by brace matching
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedObject {
    pub span: LineSpan,
    pub indent: String,
    pub separator: Separator,
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectScan {
    pub array: Option<ArraySpan>,
    pub objects: Vec<LocatedObject>,
}

/// One data line with its optional comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedLine {
    pub span: LineSpan,
    pub has_comment: bool,
}

/// First line holding `[` and last line holding `]`, if they differ.
pub fn find_array(lines: &[String]) -> Option<ArraySpan> {
    let open = lines.iter().position(|l| l.contains('['))?;
    let close = lines.iter().rposition(|l| l.contains(']'))?;
    (close > open).then_some(ArraySpan { open, close })
}

/// Locate every top-level object between the array brackets.
pub fn locate_objects(lines: &[String]) -> ObjectScan {
    let Some(array) = find_array(lines) else {
        return ObjectScan::default();
    };

    let mut objects = Vec::new();
    let mut i = array.open + 1;
    while i < array.close {
        let line = &lines[i];
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(script::COMMENT_PREFIX) {
            i += 1;
            continue;
        }
        let Some(col) = line.find('{') else {
            i += 1;
            continue;
        };
        let Some((end, end_col)) = match_braces(lines, i, col, array.close) else {
            debug!("Unbalanced object starting at line {}", i + 1);
            break;
        };

        let head = &line[..col];
        let tail = lines[end][end_col + 1..].trim();
        if !head.trim().is_empty() || !(tail.is_empty() || tail == ",") {
            debug!("Object at lines {}-{} shares its lines; not indexed", i + 1, end + 1);
            i = end + 1;
            continue;
        }

        match json::parse_lenient(&object_text(lines, i, col, end, end_col)) {
            Ok(value) => objects.push(LocatedObject {
                span: LineSpan::new(i, end),
                indent: leading_whitespace(line).to_string(),
                separator: separator_after(lines, end, tail),
                value,
            }),
            Err(e) => debug!("Object at lines {}-{} does not parse: {}", i + 1, end + 1, e),
        }
        i = end + 1;
    }

    ObjectScan {
        array: Some(array),
        objects,
    }
}

/// Locate every data line of the script format and its attached comment.
pub fn locate_script_records(lines: &[String]) -> Vec<LocatedLine> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| script::decode_line(line).is_some())
        .map(|(i, _)| {
            let has_comment = i > 0 && script::is_comment(&lines[i - 1]);
            let start = if has_comment { i - 1 } else { i };
            LocatedLine {
                span: LineSpan::new(start, i),
                has_comment,
            }
        })
        .collect()
}

/// Index of the first non-blank line at or after `from`
pub fn next_non_blank(lines: &[String], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&i| !lines[i].trim().is_empty())
}

pub fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start().len();
    &line[..end]
}

/// Find the brace closing the one at `(start_line, start_col)`, skipping
/// braces inside string literals and `//` comments. Searches lines before
/// `limit`.
fn match_braces(lines: &[String], start_line: usize, start_col: usize, limit: usize) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (j, line) in lines.iter().enumerate().take(limit).skip(start_line) {
        let from = if j == start_line { start_col } else { 0 };
        for (k, c) in line[from..].char_indices() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    in_string = false;
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '/' if line[from + k..].starts_with("//") => break,
                '{' => depth += 1,
                '}' => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some((j, from + k));
                    }
                }
                _ => {}
            }
        }
    }
    None
}

fn object_text(lines: &[String], start: usize, col: usize, end: usize, end_col: usize) -> String {
    if start == end {
        return lines[start][col..=end_col].to_string();
    }
    let mut parts = Vec::with_capacity(end - start + 1);
    parts.push(&lines[start][col..]);
    parts.extend(lines[start + 1..end].iter().map(String::as_str));
    parts.push(&lines[end][..=end_col]);
    parts.join("\n")
}

fn separator_after(lines: &[String], end: usize, tail: &str) -> Separator {
    if tail == "," {
        return Separator::Inline;
    }
    match next_non_blank(lines, end + 1) {
        Some(next) if lines[next].trim_start().starts_with(',') => Separator::NextLine,
        _ => Separator::None,
    }
}
