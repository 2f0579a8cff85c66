//! gitconfig::parser
//!
//! Parses git's INI-like configuration format into a [`ConfigNode`] tree.
//!
//! Section headers are stored under their raw name, so `[branch "main"]`
//! becomes the root child `branch "main"`. Legacy dotted headers such as
//! `[branch.main]` become nested sections instead.

use thiserror::Error;

use super::node::ConfigNode;

/// Errors from parsing a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `[` header without a closing `]`.
    #[error("line {line}: unterminated section header")]
    UnterminatedHeader { line: usize },

    /// A header with nothing between the brackets.
    #[error("line {line}: empty section name")]
    EmptySection { line: usize },

    /// A line that is not a header, comment, or key.
    #[error("line {line}: invalid key '{text}'")]
    InvalidKey { line: usize, text: String },
}

/// Parse configuration text into a tree.
///
/// # Example
///
/// ```
/// use gitapi::gitconfig::{parse, ConfigNode};
///
/// let tree = parse("[user]\n\tname = Ada\n[branch \"main\"]\n\tremote = origin\n").unwrap();
/// let user = tree.child("user").unwrap();
/// assert_eq!(user.child("name").and_then(ConfigNode::value), Some("Ada"));
/// assert!(tree.child("branch \"main\"").is_some());
/// ```
pub fn parse(content: &str) -> Result<ConfigNode, ParseError> {
    let mut root = ConfigNode::section();
    // Path of raw names from the root to the current section.
    let mut current: Option<Vec<String>> = None;

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    for (idx, line) in logical_lines(content) {
        let line_no = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let key_line = if trimmed.starts_with('[') {
            let close =
                closing_bracket(trimmed).ok_or(ParseError::UnterminatedHeader { line: line_no })?;
            current = Some(parse_section_header(&trimmed[..=close], line_no)?);
            // A key may follow the header on the same line.
            let tail = trimmed[close + 1..].trim();
            if tail.is_empty() || tail.starts_with('#') || tail.starts_with(';') {
                continue;
            }
            tail
        } else {
            trimmed
        };

        let (key, value) = parse_key_value(key_line, line_no)?;
        if let Some(path) = &current {
            let section = path
                .iter()
                .fold(&mut root, |node, name| node.section_mut(name));
            section.set_leaf(&key, value);
        }
    }

    Ok(root)
}

/// Join backslash-continued lines, yielding each logical line with the
/// index of its first physical line.
///
/// Only key lines continue. A comment, or a backslash inside a trailing
/// comment, ends the line.
fn logical_lines(content: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in content.lines().enumerate() {
        let continued = pending.is_some();
        let (start, mut buf) = pending.take().unwrap_or((idx, String::new()));
        let continues = if continued {
            ends_with_continuation(raw)
        } else {
            starts_continuation(raw)
        };
        if continues {
            buf.push_str(&raw[..raw.len() - 1]);
            pending = Some((start, buf));
        } else {
            buf.push_str(raw);
            lines.push((start, buf));
        }
    }

    if let Some(rest) = pending {
        lines.push(rest);
    }
    lines
}

/// Whether the first physical line of an entry continues onto the next.
fn starts_continuation(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with(';') {
        return false;
    }
    let body = if trimmed.starts_with('[') {
        match closing_bracket(trimmed) {
            Some(close) => &trimmed[close + 1..],
            None => return false,
        }
    } else {
        trimmed
    };
    // A trailing comment swallows the backslash; an uncommented body is
    // returned unchanged.
    let uncommented = strip_inline_comment(body);
    uncommented.len() == body.len() && ends_with_continuation(body)
}

/// A line continues when it ends in an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Parse `[section]`, `[section "sub"]`, or `[section.sub]` into the raw
/// names leading from the root to the section.
fn parse_section_header(line: &str, line_no: usize) -> Result<Vec<String>, ParseError> {
    let close = closing_bracket(line).ok_or(ParseError::UnterminatedHeader { line: line_no })?;
    let inner = line[1..close].trim();

    if inner.is_empty() {
        return Err(ParseError::EmptySection { line: line_no });
    }

    if let Some(quote_start) = inner.find('"') {
        let section = inner[..quote_start].trim();
        let rest = &inner[quote_start + 1..];
        let quote_end = rest.rfind('"').unwrap_or(rest.len());
        let subsection = unescape_subsection(&rest[..quote_end]);
        if section.is_empty() {
            return Err(ParseError::EmptySection { line: line_no });
        }
        return Ok(vec![format!("{} \"{}\"", section, subsection)]);
    }

    Ok(inner
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

/// Position of the `]` that closes a header, skipping quoted text.
fn closing_bracket(line: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escape_next = false;
    for (i, c) in line.char_indices().skip(1) {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' => escape_next = true,
            '"' => in_quotes = !in_quotes,
            ']' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

/// Git allows `\\` and `\"` inside subsection names.
fn unescape_subsection(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('\\', Some(&next)) if next == '\\' || next == '"' => {
                result.push(next);
                chars.next();
            }
            _ => result.push(c),
        }
    }

    result
}

/// Parse `key = value`, or a bare `key` meaning `true`.
fn parse_key_value(line: &str, line_no: usize) -> Result<(String, String), ParseError> {
    let (key, value) = match line.find('=') {
        Some(eq) => (line[..eq].trim(), parse_value(&line[eq + 1..])),
        None => (strip_inline_comment(line).trim(), "true".to_string()),
    };

    let valid = !key.is_empty()
        && key.starts_with(|c: char| c.is_ascii_alphabetic())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    if !valid {
        return Err(ParseError::InvalidKey {
            line: line_no,
            text: line.to_string(),
        });
    }

    Ok((key.to_string(), value))
}

/// Decode a raw value: strip comments, drop quotes, resolve escapes.
fn parse_value(raw: &str) -> String {
    let s = strip_inline_comment(raw.trim());
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    // Whitespace outside quotes is dropped at the end of the value.
    let mut trailing_ws = String::new();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                result.push_str(&std::mem::take(&mut trailing_ws));
                in_quotes = !in_quotes;
            }
            '\\' => {
                result.push_str(&std::mem::take(&mut trailing_ws));
                match chars.next() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some('b') => result.push('\u{8}'),
                    Some(other) => result.push(other),
                    None => {}
                }
            }
            c if c.is_whitespace() && !in_quotes => trailing_ws.push(c),
            c => {
                result.push_str(&std::mem::take(&mut trailing_ws));
                result.push(c);
            }
        }
    }

    result
}

/// Cut a value at the first `#` or `;` outside quotes.
fn strip_inline_comment(s: &str) -> &str {
    let mut in_quotes = false;
    let mut escape_next = false;

    for (i, c) in s.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match c {
            '\\' => escape_next = true,
            '"' => in_quotes = !in_quotes,
            '#' | ';' if !in_quotes => return s[..i].trim_end(),
            _ => {}
        }
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_at<'a>(tree: &'a ConfigNode, path: &[&str]) -> Option<&'a str> {
        path.iter()
            .try_fold(tree, |node, name| node.child(name))
            .and_then(ConfigNode::value)
    }

    mod headers {
        use super::*;

        #[test]
        fn simple_section() {
            assert_eq!(parse_section_header("[core]", 1).unwrap(), vec!["core"]);
        }

        #[test]
        fn quoted_subsection_kept_raw() {
            assert_eq!(
                parse_section_header("[remote \"origin\"]", 1).unwrap(),
                vec!["remote \"origin\""]
            );
        }

        #[test]
        fn escaped_subsection() {
            assert_eq!(
                parse_section_header(r#"[section "sub\"section"]"#, 1).unwrap(),
                vec!["section \"sub\"section\""]
            );
        }

        #[test]
        fn subsection_with_bracket() {
            assert_eq!(
                parse_section_header("[url \"git@host:[x]\"]", 1).unwrap(),
                vec!["url \"git@host:[x]\""]
            );
        }

        #[test]
        fn legacy_dotted_header_nests() {
            assert_eq!(
                parse_section_header("[branch.main]", 1).unwrap(),
                vec!["branch", "main"]
            );
        }

        #[test]
        fn unterminated_header_is_error() {
            assert_eq!(
                parse_section_header("[core", 4),
                Err(ParseError::UnterminatedHeader { line: 4 })
            );
        }

        #[test]
        fn empty_header_is_error() {
            assert_eq!(
                parse_section_header("[ ]", 2),
                Err(ParseError::EmptySection { line: 2 })
            );
        }
    }

    mod values {
        use super::*;

        #[test]
        fn plain() {
            assert_eq!(parse_value(" John Doe "), "John Doe");
        }

        #[test]
        fn quoted() {
            assert_eq!(parse_value("\"John Doe\""), "John Doe");
        }

        #[test]
        fn quoted_keeps_comment_chars() {
            assert_eq!(parse_value("\"a # b ; c\""), "a # b ; c");
        }

        #[test]
        fn inline_comments_stripped() {
            assert_eq!(parse_value("John # comment"), "John");
            assert_eq!(parse_value("John ; comment"), "John");
        }

        #[test]
        fn escapes() {
            assert_eq!(parse_value(r"a\tb\nc"), "a\tb\nc");
            assert_eq!(parse_value(r#"say \"hi\""#), "say \"hi\"");
            assert_eq!(parse_value(r"C:\\path"), "C:\\path");
            assert_eq!(parse_value(r"xy\bz"), "xy\u{8}z");
        }

        #[test]
        fn bare_key_is_true() {
            assert_eq!(
                parse_key_value("bare", 1).unwrap(),
                ("bare".to_string(), "true".to_string())
            );
        }

        #[test]
        fn invalid_key_rejected() {
            assert!(matches!(
                parse_key_value("9lives = x", 3),
                Err(ParseError::InvalidKey { line: 3, .. })
            ));
            assert!(matches!(
                parse_key_value("has space = x", 1),
                Err(ParseError::InvalidKey { .. })
            ));
        }
    }

    mod documents {
        use super::*;

        #[test]
        fn typical_repository_config() {
            let text = "\
[core]
\trepositoryformatversion = 0
\tbare = false
[remote \"origin\"]
\turl = https://example.com/repo.git
\tfetch = +refs/heads/*:refs/remotes/origin/*
[branch \"main\"]
\tremote = origin
\tmerge = refs/heads/main
";
            let tree = parse(text).unwrap();
            assert_eq!(tree.children().len(), 3);
            assert_eq!(value_at(&tree, &["core", "bare"]), Some("false"));
            assert_eq!(
                value_at(&tree, &["remote \"origin\"", "url"]),
                Some("https://example.com/repo.git")
            );
            assert_eq!(value_at(&tree, &["branch \"main\"", "remote"]), Some("origin"));
        }

        #[test]
        fn comments_and_blank_lines_ignored() {
            let text = "# leading\n\n; another\n[user]\n  # inside\n  name = Ada\n";
            let tree = parse(text).unwrap();
            assert_eq!(tree.leaf_count(), 1);
        }

        #[test]
        fn keys_before_any_section_ignored() {
            let tree = parse("orphan = 1\n[user]\nname = Ada\n").unwrap();
            assert_eq!(tree.leaf_count(), 1);
        }

        #[test]
        fn repeated_header_merges() {
            let tree = parse("[user]\nname = Ada\n[core]\nbare = false\n[user]\nemail = a@b\n")
                .unwrap();
            let names: Vec<_> = tree.children().iter().map(|(n, _)| n.as_str()).collect();
            assert_eq!(names, vec!["user", "core"]);
            assert_eq!(tree.child("user").unwrap().leaf_count(), 2);
        }

        #[test]
        fn multivar_keeps_last_value() {
            let tree = parse("[remote \"origin\"]\nfetch = a\nurl = u\nfetch = b\n").unwrap();
            let remote = tree.child("remote \"origin\"").unwrap();
            let names: Vec<_> = remote.children().iter().map(|(n, _)| n.as_str()).collect();
            assert_eq!(names, vec!["fetch", "url"]);
            assert_eq!(remote.child("fetch").and_then(ConfigNode::value), Some("b"));
        }

        #[test]
        fn continuation_lines_joined() {
            let tree = parse("[alias]\n\tlg = log \\\n--oneline\n").unwrap();
            assert_eq!(value_at(&tree, &["alias", "lg"]), Some("log --oneline"));
        }

        #[test]
        fn comment_ending_in_backslash_does_not_continue() {
            let tree = parse("[user]\n\t# path C:\\dir\\\n\tname = Ada\n").unwrap();
            assert_eq!(value_at(&tree, &["user", "name"]), Some("Ada"));
        }

        #[test]
        fn trailing_comment_ending_in_backslash_does_not_continue() {
            let tree = parse("[user]\n\tname = Ada ; C:\\dir\\\n\temail = a@b\n").unwrap();
            assert_eq!(value_at(&tree, &["user", "name"]), Some("Ada"));
            assert_eq!(value_at(&tree, &["user", "email"]), Some("a@b"));
        }

        #[test]
        fn continued_value_may_start_with_comment_char() {
            let tree = parse("[alias]\n\tx = a \\\n# b\n").unwrap();
            assert_eq!(value_at(&tree, &["alias", "x"]), Some("a"));
        }

        #[test]
        fn key_on_header_line() {
            let tree = parse("[user] name = Ada\n\temail = a@b\n").unwrap();
            assert_eq!(value_at(&tree, &["user", "name"]), Some("Ada"));
            assert_eq!(value_at(&tree, &["user", "email"]), Some("a@b"));
        }

        #[test]
        fn comment_after_header_ignored() {
            let tree = parse("[core] # settings\n\tbare = false\n").unwrap();
            assert_eq!(tree.leaf_count(), 1);
        }

        #[test]
        fn byte_order_mark_skipped() {
            let tree = parse("\u{feff}[user]\n\tname = Ada\n").unwrap();
            assert_eq!(value_at(&tree, &["user", "name"]), Some("Ada"));
        }

        #[test]
        fn error_reports_line_number() {
            let err = parse("[user]\nname = Ada\n=oops\n").unwrap_err();
            assert!(matches!(err, ParseError::InvalidKey { line: 3, .. }));
        }
    }
}
