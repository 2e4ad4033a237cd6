/*
 * line.rs
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

//! Line normalization and classification shared by the folding, body and filtering engines.

/// Result of feeding one line to an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep feeding lines.
    Continue,
    /// The engine has seen everything it needs; remaining input may be discarded.
    Done,
}

/// C `isspace` in the "C" locale: space, \t, \n, \v, \f, \r.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Remove every `\r` and turn every `\t` into a single space. The trailing `\n` is kept.
pub fn normalize_line(line: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len());
    for &b in line {
        match b {
            b'\r' => {}
            b'\t' => out.push(b' '),
            _ => out.push(b),
        }
    }
    out
}

/// In-place variant of [`normalize_line`] for callers that own the buffer.
pub fn normalize_in_place(line: &mut Vec<u8>) {
    line.retain(|&b| b != b'\r');
    for b in line.iter_mut() {
        if *b == b'\t' {
            *b = b' ';
        }
    }
}

/// True for an empty line, or one that is whitespace up to (and including) its first `\n`.
pub fn is_blank(line: &[u8]) -> bool {
    for &b in line {
        if b == b'\n' {
            return true;
        }
        if !is_space(b) {
            return false;
        }
    }
    true
}

/// True when the line folds onto the previous header field (leading space or tab).
pub fn is_continuation(line: &[u8]) -> bool {
    matches!(line.first(), Some(b' ') | Some(b'\t'))
}

/// Drop one trailing `\n`, if present.
pub(crate) fn strip_newline(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_cr_and_expands_tab() {
        assert_eq!(normalize_line(b"Subject:\tHi\r\n"), b"Subject: Hi\n");
        assert_eq!(normalize_line(b"\t\tx\r\r\n"), b"  x\n");
        assert_eq!(normalize_line(b""), b"");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_line(b"A:\t b\r\n\tc\r\n");
        assert_eq!(normalize_line(&once), once);
    }

    #[test]
    fn in_place_matches_copying_variant() {
        let raw = b"X-Foo:\tbar\r\n".to_vec();
        let mut buf = raw.clone();
        normalize_in_place(&mut buf);
        assert_eq!(buf, normalize_line(&raw));
    }

    #[test]
    fn blank_lines() {
        assert!(is_blank(b""));
        assert!(is_blank(b"\n"));
        assert!(is_blank(b"\r\n"));
        assert!(is_blank(b" \t \n"));
        assert!(is_blank(b"   "));
        assert!(!is_blank(b"X: 1\n"));
        assert!(!is_blank(b" x\n"));
        // Only the part up to the first newline counts.
        assert!(is_blank(b"\nnot blank\n"));
    }

    #[test]
    fn vertical_tab_and_form_feed_are_blank() {
        assert!(is_blank(b"\x0b\x0c\n"));
        assert!(is_blank(b" \x0c"));
        assert!(is_blank(b"\x0b\r\n"));
        assert!(!is_blank(b"\x0bx\n"));
        assert!(!is_continuation(b"\x0b\n"));
    }

    #[test]
    fn continuation_lines() {
        assert!(is_continuation(b" folded\n"));
        assert!(is_continuation(b"\tfolded\n"));
        assert!(!is_continuation(b"Subject: x\n"));
        assert!(!is_continuation(b""));
    }
}
