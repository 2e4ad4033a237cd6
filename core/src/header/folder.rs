/*
 * folder.rs
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

//! Header extraction: everything up to the first blank line, with folded fields unfolded.

use super::line::{is_blank, is_continuation, normalize_in_place, strip_newline, Flow};

/// Emits the header block with continuation lines joined onto their field.
///
/// Holds exactly one line of lookahead: a normalized line is only written once the next
/// physical line is known, because a following continuation line means its `\n` must go.
#[derive(Default)]
pub struct HeaderFolder {
    pending: Option<Vec<u8>>,
    done: bool,
}

impl HeaderFolder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw line (with its terminator, if any). Returns [`Flow::Done`] once the
    /// blank line ending the header section has been seen.
    pub fn process_line<F>(&mut self, line: &[u8], mut out: F) -> Flow
    where
        F: FnMut(&[u8]),
    {
        if self.done {
            return Flow::Done;
        }
        if let Some(current) = self.pending.take() {
            if is_continuation(line) {
                out(strip_newline(&current));
            } else {
                out(&current);
            }
        }
        if is_blank(line) {
            self.done = true;
            return Flow::Done;
        }
        let mut current = line.to_vec();
        normalize_in_place(&mut current);
        self.pending = Some(current);
        Flow::Continue
    }

    /// End of input: the held line has no successor, so it keeps its terminator.
    pub fn finish<F>(&mut self, mut out: F)
    where
        F: FnMut(&[u8]),
    {
        if let Some(current) = self.pending.take() {
            out(&current);
        }
        self.done = true;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fold(input: &[u8]) -> Vec<u8> {
        let mut folder = HeaderFolder::new();
        let mut out = Vec::new();
        for line in input.split_inclusive(|&b| b == b'\n') {
            if folder.process_line(line, |s| out.extend_from_slice(s)) == Flow::Done {
                break;
            }
        }
        folder.finish(|s| out.extend_from_slice(s));
        out
    }

    #[test]
    fn continuation_is_joined_and_crlf_stripped() {
        assert_eq!(fold(b"Subject: A\r\n B\r\n\r\n"), b"Subject: A B\n");
    }

    #[test]
    fn stops_at_first_blank_line() {
        let out = fold(b"From: a@b\nTo: c@d\n\nBody\nMore: not a header\n");
        assert_eq!(out, b"From: a@b\nTo: c@d\n");
    }

    #[test]
    fn several_continuations_fold_into_one_line() {
        let out = fold(b"Received: from x\n\tby y\n  with z\nSubject: s\n\n");
        assert_eq!(out, b"Received: from x by y  with z\nSubject: s\n");
    }

    #[test]
    fn headers_only_message_without_trailing_newline() {
        assert_eq!(fold(b"A: 1\nB: 2"), b"A: 1\nB: 2");
    }

    #[test]
    fn whitespace_only_line_folds_and_ends_block() {
        let mut folder = HeaderFolder::new();
        let mut out = Vec::new();
        assert_eq!(folder.process_line(b"Subject: a\n", |s| out.extend_from_slice(s)), Flow::Continue);
        assert_eq!(folder.process_line(b" \n", |s| out.extend_from_slice(s)), Flow::Done);
        assert!(folder.is_done());
        folder.process_line(b"Body\n", |s| out.extend_from_slice(s));
        folder.finish(|s| out.extend_from_slice(s));
        assert_eq!(out, b"Subject: a");
        assert_eq!(fold(b"Subject: a\n\t\r\nTo: b\n"), b"Subject: a");
    }

    #[test]
    fn leading_blank_line_yields_nothing() {
        assert_eq!(fold(b"\nA: 1\n"), b"");
        assert_eq!(fold(b""), b"");
    }

    #[test]
    fn lines_after_done_are_ignored() {
        let mut folder = HeaderFolder::new();
        let mut out = Vec::new();
        assert_eq!(folder.process_line(b"A: 1\n", |s| out.extend_from_slice(s)), Flow::Continue);
        assert_eq!(folder.process_line(b"\n", |s| out.extend_from_slice(s)), Flow::Done);
        assert_eq!(folder.process_line(b"B: 2\n", |s| out.extend_from_slice(s)), Flow::Done);
        assert!(folder.is_done());
        assert_eq!(out, b"A: 1\n");
    }
}
