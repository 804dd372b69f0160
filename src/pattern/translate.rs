//! Shell glob to capturing regex translation.
//!
//! Same syntax as `fnmatch`: `*`, `?` and `[...]` classes with `!` negation
//! and ranges. There is no way to quote meta characters. Every wildcard
//! becomes a capture group, numbered from left to right, so a glob can feed
//! the templates of a quantified criterion.

use regex::Regex;

use crate::error::Result;

enum Piece {
    Star,
    Fixed(String),
}

/// Translate a glob into an anchored regular expression.
///
/// ```
/// use dirmagic::pattern::translate;
///
/// assert_eq!(translate("*.txt"), r"\A(?s:(.*)\.txt)\z");
/// assert_eq!(translate("a?c"), r"\A(?s:a(.)c)\z");
/// ```
pub fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let n = chars.len();
    let mut pieces: Vec<Piece> = Vec::new();
    let mut i = 0;

    while i < n {
        let c = chars[i];
        i += 1;
        match c {
            '*' => {
                if !matches!(pieces.last(), Some(Piece::Star)) {
                    pieces.push(Piece::Star);
                }
            }
            '?' => pieces.push(Piece::Fixed("(.)".to_string())),
            '[' => {
                let mut j = i;
                if j < n && chars[j] == '!' {
                    j += 1;
                }
                if j < n && chars[j] == ']' {
                    j += 1;
                }
                while j < n && chars[j] != ']' {
                    j += 1;
                }
                if j >= n {
                    pieces.push(Piece::Fixed(r"\[".to_string()));
                } else {
                    pieces.push(Piece::Fixed(translate_class(&chars[i..j])));
                    i = j + 1;
                }
            }
            other => pieces.push(Piece::Fixed(regex::escape(&other.to_string()))),
        }
    }

    let mut out = String::new();
    let mut rest = pieces.into_iter().peekable();

    while let Some(Piece::Fixed(fixed)) = rest.peek() {
        out.push_str(fixed);
        rest.next();
    }

    // Only STAR fixed STAR fixed ... remains. Interior segments use a lazy
    // group; the regex crate never backtracks so no atomic group is needed.
    while rest.next().is_some() {
        let mut fixed = String::new();
        while let Some(Piece::Fixed(piece)) = rest.peek() {
            fixed.push_str(piece);
            rest.next();
        }
        if fixed.is_empty() {
            out.push_str("(.*)");
        } else if rest.peek().is_none() {
            out.push_str("(.*)");
            out.push_str(&fixed);
        } else {
            out.push_str("(.*?)");
            out.push_str(&fixed);
        }
    }

    format!(r"\A(?s:{})\z", out)
}

/// Translate the content of a `[...]` class (without the brackets).
fn translate_class(body: &[char]) -> String {
    let (negated, body) = match body.first() {
        Some('!') => (true, &body[1..]),
        _ => (false, body),
    };

    let mut items = Vec::new();
    let mut p = 0;
    while p < body.len() {
        let lo = body[p];
        if p + 2 < body.len() && body[p + 1] == '-' {
            let hi = body[p + 2];
            // reversed ranges are empty
            if lo <= hi {
                items.push(format!("{}-{}", escape_char(lo), escape_char(hi)));
            }
            p += 3;
        } else {
            items.push(escape_char(lo));
            p += 1;
        }
    }

    match (items.is_empty(), negated) {
        (true, false) => r"(?:\b\B)".to_string(),
        (true, true) => "(.)".to_string(),
        (false, false) => format!("([{}])", items.concat()),
        (false, true) => format!("([^{}])", items.concat()),
    }
}

fn escape_char(c: char) -> String {
    regex::escape(&c.to_string())
}

/// Compile a glob into a regex, see [`translate`].
pub fn glob_to_regex(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&translate(pattern))?)
}
