/*
 * body.rs
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

//! Body extraction: everything after the first blank line.

use super::line::{is_blank, normalize_line, Flow};

/// Skips the header section (no folding) and emits every later line normalized.
/// A message without a blank line has no body and produces nothing.
#[derive(Default)]
pub struct BodyExtractor {
    in_body: bool,
}

impl BodyExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_line<F>(&mut self, line: &[u8], mut out: F) -> Flow
    where
        F: FnMut(&[u8]),
    {
        if self.in_body {
            out(&normalize_line(line));
        } else if is_blank(line) {
            self.in_body = true;
        }
        Flow::Continue
    }

    /// True once the header/body separator has been consumed.
    pub fn in_body(&self) -> bool {
        self.in_body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(input: &[u8]) -> Vec<u8> {
        let mut extractor = BodyExtractor::new();
        let mut out = Vec::new();
        for line in input.split_inclusive(|&b| b == b'\n') {
            extractor.process_line(line, |s| out.extend_from_slice(s));
        }
        out
    }

    #[test]
    fn emits_lines_after_separator() {
        assert_eq!(body(b"X: 1\n\n body line\n"), b" body line\n");
    }

    #[test]
    fn no_separator_means_no_body() {
        assert_eq!(body(b"X: 1\nY: 2\n"), b"");
    }

    #[test]
    fn later_blank_lines_and_tabs_are_kept_normalized() {
        let out = body(b"X: 1\r\n\r\npara one\r\n\r\n\tindented\r\n");
        assert_eq!(out, b"para one\n\n indented\n");
    }

    #[test]
    fn folded_headers_are_skipped_entirely() {
        let out = body(b"Subject: a\n b\n\nhello\n");
        assert_eq!(out, b"hello\n");
    }
}
