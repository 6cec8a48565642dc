//! Route pattern matching logic.
//!
//! # Responsibilities
//! - Match a pattern against a whole "VERB PATH" descriptor with path-glob semantics
//! - Handle the bare `**` catch-all and the trailing `/**` subtree suffix
//! - Report malformed patterns instead of treating them as a mismatch
//!
//! # Design Decisions
//! - `*` and `?` never consume `/`
//! - The verb is not a separate field: it is the text before the first space
//! - No regex; patterns are interpreted directly on every lookup
//! - Scratch strings (subtree prefix, subpattern) are local to a single call

use thiserror::Error;

/// Syntax problems found while evaluating a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GlobError {
    /// Invalid glob syntax (unterminated class, dangling escape, empty range).
    #[error("syntax error in pattern")]
    BadPattern,

    /// A `**`-suffixed pattern without any `/`, e.g. `GET **`.
    #[error("illegal ** pattern: no '/' before the wildcard")]
    IllegalSubtree,
}

/// Result of evaluating one pattern against one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    NoMatch,
}

/// Evaluate a single pattern against a descriptor.
///
/// `**`-suffixed patterns get a subtree attempt first and then fall through
/// to an ordinary glob match against the full descriptor.
pub fn evaluate(pattern: &str, descriptor: &str) -> Result<Outcome, GlobError> {
    if pattern.ends_with("**") && subtree_match(pattern, descriptor)? {
        return Ok(Outcome::Matched);
    }

    if glob_match(pattern, descriptor)? {
        Ok(Outcome::Matched)
    } else {
        Ok(Outcome::NoMatch)
    }
}

/// Match a `**`-suffixed pattern as a subtree.
///
/// For a pattern with `k` slashes the descriptor is split on `/` into at most
/// `k + 1` pieces and the first `k` are rejoined into the prefix. The pattern
/// minus its trailing `/**` is then globbed against that prefix.
pub fn subtree_match(pattern: &str, descriptor: &str) -> Result<bool, GlobError> {
    if pattern == "**" {
        return Ok(true);
    }

    let slashes = pattern.matches('/').count();
    if slashes == 0 {
        return Err(GlobError::IllegalSubtree);
    }

    let prefix = descriptor
        .splitn(slashes + 1, '/')
        .take(slashes)
        .collect::<Vec<_>>()
        .join("/");

    let subpattern = match pattern.rfind("/**") {
        Some(idx) => format!("{}{}", &pattern[..idx], &pattern[idx + 3..]),
        None => pattern.to_string(),
    };

    glob_match(&subpattern, &prefix)
}

/// Report whether `name` matches the shell pattern `pattern` in its entirety.
///
/// Syntax:
/// - `*` matches any run of non-`/` characters
/// - `?` matches one non-`/` character
/// - `[...]` matches one character from a class; `[^...]` negates it,
///   `a-z` is a range and `\` escapes inside the class
/// - `\c` matches `c` literally
///
/// A malformed pattern is an error even when the name has already failed to
/// match an earlier part of it.
pub fn glob_match(pattern: &str, name: &str) -> Result<bool, GlobError> {
    let mut pattern = pattern;
    let mut name = name;

    'pattern: while !pattern.is_empty() {
        let (star, chunk, rest) = scan_chunk(pattern);
        pattern = rest;

        if star && chunk.is_empty() {
            // Trailing * swallows the rest unless it would cross a separator.
            return Ok(!name.contains('/'));
        }

        if let Some(tail) = match_chunk(chunk, name)? {
            // The last chunk has to consume the whole name, otherwise a
            // preceding star may still find a longer match.
            if tail.is_empty() || !pattern.is_empty() {
                name = tail;
                continue;
            }
        }

        if star {
            for (idx, ch) in name.char_indices() {
                if ch == '/' {
                    break;
                }
                let skipped = &name[idx + ch.len_utf8()..];
                if let Some(tail) = match_chunk(chunk, skipped)? {
                    if pattern.is_empty() && !tail.is_empty() {
                        continue;
                    }
                    name = tail;
                    continue 'pattern;
                }
            }
        }

        // No match. The rest of the pattern still has to be well formed.
        while !pattern.is_empty() {
            let (_, chunk, rest) = scan_chunk(pattern);
            pattern = rest;
            match_chunk(chunk, "")?;
        }
        return Ok(false);
    }

    Ok(name.is_empty())
}

/// Split off the leading stars and the literal chunk that follows them.
fn scan_chunk(pattern: &str) -> (bool, &str, &str) {
    let trimmed = pattern.trim_start_matches('*');
    let star = trimmed.len() != pattern.len();

    let bytes = trimmed.as_bytes();
    let mut in_class = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                if i + 1 < bytes.len() {
                    i += 1;
                }
            }
            b'[' => in_class = true,
            b']' => in_class = false,
            b'*' if !in_class => break,
            _ => {}
        }
        i += 1;
    }

    (star, &trimmed[..i], &trimmed[i..])
}

/// Match a star-free chunk at the start of `s`, returning the unmatched tail.
///
/// Once the match has failed the chunk is still walked so that syntax errors
/// are reported.
fn match_chunk<'a>(chunk: &str, s: &'a str) -> Result<Option<&'a str>, GlobError> {
    let mut chunk = chunk;
    let mut s = s;
    let mut failed = false;

    while let Some(op) = chunk.chars().next() {
        let next = if failed { None } else { split_first(s) };
        if next.is_none() {
            failed = true;
        }

        match op {
            '[' => {
                let mut current = '\0';
                if let Some((ch, rest)) = next {
                    current = ch;
                    s = rest;
                }
                chunk = &chunk[1..];

                let negated = chunk.starts_with('^');
                if negated {
                    chunk = &chunk[1..];
                }

                let mut in_class = false;
                let mut ranges = 0;
                loop {
                    if ranges > 0 && chunk.starts_with(']') {
                        chunk = &chunk[1..];
                        break;
                    }
                    let (lo, rest) = class_char(chunk)?;
                    chunk = rest;
                    let mut hi = lo;
                    if let Some(rest) = chunk.strip_prefix('-') {
                        let (upper, rest) = class_char(rest)?;
                        hi = upper;
                        chunk = rest;
                    }
                    if lo <= current && current <= hi {
                        in_class = true;
                    }
                    ranges += 1;
                }

                if in_class == negated {
                    failed = true;
                }
            }
            '?' => {
                if let Some((ch, rest)) = next {
                    if ch == '/' {
                        failed = true;
                    }
                    s = rest;
                }
                chunk = &chunk[1..];
            }
            _ => {
                let literal = if op == '\\' {
                    chunk = &chunk[1..];
                    chunk.chars().next().ok_or(GlobError::BadPattern)?
                } else {
                    op
                };
                if let Some((ch, rest)) = next {
                    if ch != literal {
                        failed = true;
                    }
                    s = rest;
                }
                chunk = &chunk[literal.len_utf8()..];
            }
        }
    }

    if failed {
        Ok(None)
    } else {
        Ok(Some(s))
    }
}

/// Read one (possibly escaped) character of a class. Something must follow it.
fn class_char(chunk: &str) -> Result<(char, &str), GlobError> {
    let chunk = match chunk.chars().next() {
        None | Some('-') | Some(']') => return Err(GlobError::BadPattern),
        Some('\\') => &chunk[1..],
        Some(_) => chunk,
    };

    let (ch, rest) = split_first(chunk).ok_or(GlobError::BadPattern)?;
    if rest.is_empty() {
        return Err(GlobError::BadPattern);
    }
    Ok((ch, rest))
}

fn split_first(s: &str) -> Option<(char, &str)> {
    let mut chars = s.chars();
    chars.next().map(|ch| (ch, chars.as_str()))
}
