//! Comment stripping for JavaScript/TypeScript sources
//!
//! Removes `//` and `/* */` comments while leaving string, template and
//! regular-expression literals untouched. Newlines are always kept, so line
//! numbers in compiler diagnostics still point at the original source.

use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

/// Extensions treated as script sources; everything else is copied verbatim
pub const SCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Characters after which a `/` starts a regular expression rather than a division
const REGEX_PRECEDERS: &str = "(,=:[!&|?{};+-*%<>~^";

/// Keywords after which a `/` starts a regular expression
const REGEX_KEYWORDS: &[&str] = &[
    "await", "case", "delete", "do", "else", "in", "instanceof", "new", "of", "return", "throw",
    "typeof", "void", "yield",
];

pub fn is_script(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SCRIPT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut last_significant: Option<char> = None;
    // identifier or keyword ending at `last_significant`
    let mut word = String::new();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                out.push(c);
                copy_quoted(&mut chars, &mut out, c);
                last_significant = Some(c);
                word.clear();
            }
            '/' => match chars.peek() {
                Some('/') => {
                    trim_trailing_blanks(&mut out);
                    for next in chars.by_ref() {
                        if next == '\n' {
                            out.push('\n');
                            break;
                        }
                    }
                }
                Some('*') => {
                    chars.next();
                    skip_block_comment(&mut chars, &mut out);
                }
                _ if regex_allowed(last_significant, &word) => {
                    out.push('/');
                    copy_regex(&mut chars, &mut out);
                    last_significant = Some('/');
                    word.clear();
                }
                _ => {
                    out.push('/');
                    last_significant = Some('/');
                    word.clear();
                }
            },
            _ => {
                if is_identifier(c) {
                    if !out.ends_with(is_identifier) {
                        word.clear();
                    }
                    word.push(c);
                } else if !c.is_whitespace() {
                    word.clear();
                }
                out.push(c);
                if !c.is_whitespace() {
                    last_significant = Some(c);
                }
            }
        }
    }

    out
}

fn regex_allowed(last_significant: Option<char>, word: &str) -> bool {
    match last_significant {
        None => true,
        Some(c) if is_identifier(c) => REGEX_KEYWORDS.contains(&word),
        Some(c) => REGEX_PRECEDERS.contains(c),
    }
}

fn is_identifier(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn trim_trailing_blanks(out: &mut String) {
    while out.ends_with([' ', '\t']) {
        out.pop();
    }
}

fn copy_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String, quote: char) {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            // unterminated single-line string
            '\n' if quote != '`' => return,
            c if c == quote => return,
            _ => {}
        }
    }
}

fn copy_regex(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    let mut in_class = false;
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                    if escaped == '\n' {
                        return;
                    }
                }
            }
            '[' => in_class = true,
            ']' => in_class = false,
            '/' if !in_class => return,
            '\n' => return,
            _ => {}
        }
    }
}

fn skip_block_comment(chars: &mut Peekable<Chars<'_>>, out: &mut String) {
    let mut prev = '\0';
    let mut spans_lines = false;
    for c in chars.by_ref() {
        if prev == '*' && c == '/' {
            break;
        }
        if c == '\n' {
            out.push('\n');
            spans_lines = true;
        }
        prev = c;
    }
    // a comment separates tokens like whitespace does
    if !spans_lines && !out.is_empty() && !out.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}
