//! Redis-compatible glob matching for the in-memory backend.
//!
//! Supports `*`, `?`, character classes (`[abc]`, `[^abc]`, `[a-z]`) and `\`
//! escapes. The pattern is compiled once into an anchored regex.

use crate::error::{Error, Result};
use regex::Regex;

pub struct GlobMatcher {
    re: Regex,
}

impl GlobMatcher {
    pub fn new(pattern: &str) -> Result<Self> {
        let re = Regex::new(&glob_to_regex(pattern))
            .map_err(|e| Error::invalid(format!("bad glob pattern '{}': {}", pattern, e)))?;
        Ok(Self { re })
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.re.is_match(key)
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("(?s)^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '\\' if i + 1 < chars.len() => {
                i += 1;
                out.push_str(&regex::escape(&chars[i].to_string()));
            }
            '[' => {
                let (class, next) = parse_class(&chars, i + 1);
                out.push_str(&class);
                i = next;
                continue;
            }
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }

    out.push('$');
    out
}

/// Parses a class body starting right after `[`. Returns the regex class and
/// the index just past the closing `]`. A class left open runs to the end of
/// the pattern, as in Redis.
fn parse_class(chars: &[char], start: usize) -> (String, usize) {
    let mut i = start;
    let negated = chars.get(i) == Some(&'^');
    if negated {
        i += 1;
    }

    let mut items = String::new();
    while i < chars.len() {
        let mut c = chars[i];
        if c == ']' {
            return (build_class(&items, negated), i + 1);
        }
        if c == '\\' && i + 1 < chars.len() {
            i += 1;
            c = chars[i];
        }

        if chars.get(i + 1) == Some(&'-') && i + 2 < chars.len() && chars[i + 2] != ']' {
            let mut end = chars[i + 2];
            let mut lo = c;
            if lo > end {
                std::mem::swap(&mut lo, &mut end);
            }
            items.push_str(&escape_class_char(lo));
            items.push('-');
            items.push_str(&escape_class_char(end));
            i += 3;
        } else {
            items.push_str(&escape_class_char(c));
            i += 1;
        }
    }

    (build_class(&items, negated), chars.len())
}

fn build_class(items: &str, negated: bool) -> String {
    match (items.is_empty(), negated) {
        (true, true) => "(?s:.)".to_string(),
        (true, false) => r"[^\s\S]".to_string(),
        (false, true) => format!("[^{}]", items),
        (false, false) => format!("[{}]", items),
    }
}

fn escape_class_char(c: char) -> String {
    match c {
        '\\' | ']' | '[' | '^' | '-' | '&' | '~' => format!("\\{}", c),
        _ => c.to_string(),
    }
}
