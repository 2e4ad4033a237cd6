/*
 * pattern.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of mailheaderclean, a set of email header tools.
 *
 * mailheaderclean is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * mailheaderclean is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with mailheaderclean.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Case-insensitive shell-glob matching of header field names against removal patterns.

use globset::{Glob, GlobBuilder};

use crate::error::PolicyError;

/// Compile one removal pattern. `*` may match any run of characters (including `/`), the match is
/// anchored at both ends and ignores case. A pattern that is not a valid glob (an unclosed `[`, say)
/// is compiled as its literal text.
pub(crate) fn compile_pattern(pattern: &str) -> Result<Glob, PolicyError> {
    match build_glob(pattern) {
        Ok(glob) => Ok(glob),
        Err(_) => build_glob(&globset::escape(pattern)).map_err(|e| PolicyError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        }),
    }
}

fn build_glob(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(&literal_braces(pattern))
        .case_insensitive(true)
        .literal_separator(false)
        .backslash_escape(true)
        .build()
}

/// Shell globs have no `{a,b}` alternation: rewrite braces outside a `[...]` class as one-character
/// classes so they match themselves.
fn literal_braces(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    // Members seen so far in an open class, and whether it opened with `!` or `^`.
    let mut class: Option<(usize, bool)> = None;
    while let Some(c) = chars.next() {
        out.push(c);
        match class {
            Some((0, false)) if c == '!' || c == '^' => class = Some((0, true)),
            Some((0, _)) => class = Some((1, false)),
            Some(_) if c == ']' => class = None,
            Some(_) => {}
            None => match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '[' => class = Some((0, false)),
                '{' | '}' => {
                    out.pop();
                    out.push('[');
                    out.push(c);
                    out.push(']');
                }
                _ => {}
            },
        }
    }
    out
}

/// A single compiled removal pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: String,
    matcher: globset::GlobMatcher,
}

impl PatternMatcher {
    pub fn new(pattern: &str) -> Result<Self, PolicyError> {
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: compile_pattern(pattern)?.compile_matcher(),
        })
    }

    /// Whether the whole header name matches this pattern.
    pub fn is_match(&self, header_name: &str) -> bool {
        self.matcher.is_match(header_name)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// One-shot match of `header_name` against `pattern`.
pub fn matches(pattern: &str, header_name: &str) -> bool {
    match PatternMatcher::new(pattern) {
        Ok(m) => m.is_match(header_name),
        Err(_) => pattern.eq_ignore_ascii_case(header_name),
    }
}
