/*
 * filter.rs
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

//! In-place header filtering: drop header fields matched by the removal list, keep only the
//! first Received field, pass the body through untouched.

use tracing::debug;

use super::line::{is_blank, is_continuation, normalize_line, Flow};
use super::policy::RemovalList;

/// Field names this long or longer are not treated as names; such lines are passed through.
pub const MAX_FIELD_NAME_LEN: usize = 255;

const RECEIVED: &[u8] = b"Received";

/// Mutable per-message state of the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// True until the blank line separating headers from body; never true again afterwards.
    pub in_headers: bool,
    /// Decision for the field being read; continuation lines follow it.
    pub keep_current: bool,
    /// Set when the first Received field has been kept.
    pub first_received_seen: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            in_headers: true,
            keep_current: true,
            first_received_seen: false,
        }
    }
}

/// Counters reported once a message has been filtered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub fields_kept: usize,
    pub fields_removed: usize,
    pub received_dropped: usize,
    pub unparseable_lines: usize,
}

/// Header filter for one message. Borrows the (read-only) removal list, so one list can serve
/// many filters.
pub struct HeaderFilter<'p> {
    removal: &'p RemovalList,
    state: FilterState,
    stats: FilterStats,
}

impl<'p> HeaderFilter<'p> {
    pub fn new(removal: &'p RemovalList) -> Self {
        Self {
            removal,
            state: FilterState::default(),
            stats: FilterStats::default(),
        }
    }

    /// Feed one raw line; kept output goes to `out`. Header lines that are kept are
    /// normalized, the separator and the body are emitted byte for byte.
    pub fn process_line<F>(&mut self, line: &[u8], mut out: F) -> Flow
    where
        F: FnMut(&[u8]),
    {
        if !self.state.in_headers {
            out(line);
            return Flow::Continue;
        }
        if is_blank(line) {
            self.state.in_headers = false;
            out(line);
            return Flow::Continue;
        }
        if is_continuation(line) {
            if self.state.keep_current {
                out(&normalize_line(line));
            }
            return Flow::Continue;
        }

        let name = match field_name(line) {
            Some(name) => name,
            None => {
                debug!("[filter] passing through unparseable header line");
                self.stats.unparseable_lines += 1;
                self.state.keep_current = true;
                out(&normalize_line(line));
                return Flow::Continue;
            }
        };

        if name.eq_ignore_ascii_case(RECEIVED) {
            if self.state.first_received_seen {
                self.state.keep_current = false;
                self.stats.received_dropped += 1;
            } else {
                self.state.first_received_seen = true;
                self.keep(line, out);
            }
            return Flow::Continue;
        }

        if self.removal.matches_any(&String::from_utf8_lossy(name)) {
            self.state.keep_current = false;
            self.stats.fields_removed += 1;
        } else {
            self.keep(line, out);
        }
        Flow::Continue
    }

    fn keep<F>(&mut self, line: &[u8], mut out: F)
    where
        F: FnMut(&[u8]),
    {
        self.state.keep_current = true;
        self.stats.fields_kept += 1;
        out(&normalize_line(line));
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn stats(&self) -> FilterStats {
        self.stats
    }
}

/// Bytes before the first `:`, or None if there is no colon or the name is too long.
fn field_name(line: &[u8]) -> Option<&[u8]> {
    let colon = line.iter().position(|&b| b == b':')?;
    if colon >= MAX_FIELD_NAME_LEN {
        return None;
    }
    Some(&line[..colon])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(removal: &RemovalList, input: &[u8]) -> (Vec<u8>, FilterState) {
        let mut filter = HeaderFilter::new(removal);
        let mut out = Vec::new();
        for line in input.split_inclusive(|&b| b == b'\n') {
            filter.process_line(line, |s| out.extend_from_slice(s));
        }
        (out, filter.state().clone())
    }

    fn removal(patterns: &[&str]) -> RemovalList {
        RemovalList::from_patterns(patterns.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn only_first_received_survives() {
        let input = b"Received: from a\nReceived: from b\n\tby c\nSubject: hi\n\nbody\n";
        let (out, state) = run(&RemovalList::empty(), input);
        assert_eq!(out, b"Received: from a\nSubject: hi\n\nbody\n");
        assert!(state.first_received_seen);
        assert!(!state.in_headers);
    }

    #[test]
    fn received_rule_beats_removal_list() {
        let input = b"received: one\nRECEIVED: two\n\n";
        let (out, _) = run(&removal(&["Received", "*"]), input);
        assert_eq!(out, b"received: one\n\n");
    }

    #[test]
    fn removed_field_drops_its_continuations() {
        let input = b"X-Spam-Status: No\n\tscore=1\n  tests=none\nSubject: ok\n\n";
        let (out, _) = run(&removal(&["X-Spam-*"]), input);
        assert_eq!(out, b"Subject: ok\n\n");
    }

    #[test]
    fn kept_field_keeps_normalized_continuations() {
        let input = b"Subject: long\r\n\tpart two\r\n part three\r\n\r\n";
        let (out, _) = run(&removal(&["X-*"]), input);
        assert_eq!(out, b"Subject: long\n part two\n part three\n\r\n");
    }

    #[test]
    fn line_without_colon_passes_through() {
        let input = b"not a header\tline\r\n\tcontinued\nReceived: x\n\n";
        let (out, state) = run(&removal(&["*"]), input);
        assert_eq!(out, b"not a header line\n continued\nReceived: x\n\n");
        assert!(state.first_received_seen);
    }

    #[test]
    fn unparseable_line_leaves_received_state_alone() {
        let empty = RemovalList::empty();
        let mut filter = HeaderFilter::new(&empty);
        filter.process_line(b"garbage\n", |_| {});
        assert!(!filter.state().first_received_seen);
        assert!(filter.state().keep_current);
        assert_eq!(filter.stats().unparseable_lines, 1);
    }

    #[test]
    fn overlong_name_is_unparseable() {
        let mut line = vec![b'X'; MAX_FIELD_NAME_LEN];
        line.extend_from_slice(b": v\n");
        let removal = removal(&["X*"]);
        let mut filter = HeaderFilter::new(&removal);
        let mut out = Vec::new();
        filter.process_line(&line, |s| out.extend_from_slice(s));
        assert_eq!(out, line);

        let mut short = vec![b'X'; MAX_FIELD_NAME_LEN - 1];
        short.extend_from_slice(b": v\n");
        out.clear();
        filter.process_line(&short, |s| out.extend_from_slice(s));
        assert!(out.is_empty());
    }

    #[test]
    fn body_is_byte_for_byte() {
        let input = b"X-Mailer: m\r\n\r\n\tTabbed\r\nX-Mailer: not a header here\r\n";
        let (out, _) = run(&removal(&["X-Mailer"]), input);
        assert_eq!(out, b"\r\n\tTabbed\r\nX-Mailer: not a header here\r\n");
    }

    #[test]
    fn wildcard_name_match_is_case_insensitive() {
        let input = b"x-ms-exchange-id: 1\nY-X-MS-Foo: 2\nOrganization: o\nX-Organization: p\n\n";
        let (out, _) = run(&removal(&["X-MS-*", "Organization"]), input);
        assert_eq!(out, b"Y-X-MS-Foo: 2\nX-Organization: p\n\n");
    }

    #[test]
    fn stats_count_decisions() {
        let removal = removal(&["X-*"]);
        let mut filter = HeaderFilter::new(&removal);
        let lines: [&[u8]; 5] = [b"Received: a\n", b"Received: b\n", b"X-A: 1\n", b"To: t\n", b"\n"];
        for line in lines {
            filter.process_line(line, |_| {});
        }
        assert_eq!(
            filter.stats(),
            FilterStats {
                fields_kept: 2,
                fields_removed: 1,
                received_dropped: 1,
                unparseable_lines: 0,
            }
        );
    }
}
