/*
 * message.rs
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

//! Blocking entry points: run one engine over a whole message from a reader (or a named file)
//! into a writer.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{MailError, Result};
use crate::header::{BodyExtractor, FilterStats, Flow, HeaderFilter, HeaderFolder, RemovalList};

/// Read `\n`-terminated lines (the last one may be unterminated) until EOF or until `f`
/// returns [`Flow::Done`].
pub fn for_each_line<R, F>(reader: &mut R, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(&[u8]) -> Result<Flow>,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        if f(&line)? == Flow::Done {
            return Ok(());
        }
    }
}

/// Writes engine output, keeping the first write error for the caller.
struct Sink<'w, W: Write> {
    writer: &'w mut W,
    error: Option<std::io::Error>,
}

impl<'w, W: Write> Sink<'w, W> {
    fn new(writer: &'w mut W) -> Self {
        Self { writer, error: None }
    }

    fn write(&mut self, data: &[u8]) {
        if self.error.is_none() {
            if let Err(e) = self.writer.write_all(data) {
                self.error = Some(e);
            }
        }
    }

    fn check(&mut self) -> Result<()> {
        match self.error.take() {
            Some(e) => Err(MailError::Io(e)),
            None => Ok(()),
        }
    }

    fn flush(mut self) -> Result<()> {
        self.check()?;
        self.writer.flush()?;
        Ok(())
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| MailError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

/// Write the header block, unfolded, without the separating blank line.
pub fn extract_headers<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<()> {
    let mut folder = HeaderFolder::new();
    let mut sink = Sink::new(writer);
    for_each_line(reader, |line| {
        let flow = folder.process_line(line, |s| sink.write(s));
        sink.check()?;
        Ok(flow)
    })?;
    folder.finish(|s| sink.write(s));
    sink.flush()
}

/// Write everything after the first blank line, normalized.
pub fn extract_body<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> Result<()> {
    let mut extractor = BodyExtractor::new();
    let mut sink = Sink::new(writer);
    for_each_line(reader, |line| {
        let flow = extractor.process_line(line, |s| sink.write(s));
        sink.check()?;
        Ok(flow)
    })?;
    if !extractor.in_body() {
        debug!("[body] no header/body separator; message has no body");
    }
    sink.flush()
}

/// Write the message with removed header fields dropped and the body untouched.
pub fn filter_headers<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    removal: &RemovalList,
) -> Result<FilterStats> {
    let mut filter = HeaderFilter::new(removal);
    let mut sink = Sink::new(writer);
    for_each_line(reader, |line| {
        let flow = filter.process_line(line, |s| sink.write(s));
        sink.check()?;
        Ok(flow)
    })?;
    sink.flush()?;
    let stats = filter.stats();
    debug!(
        "[filter] kept {} fields, removed {}, dropped {} extra Received",
        stats.fields_kept, stats.fields_removed, stats.received_dropped
    );
    Ok(stats)
}

/// Open `path` and run [`extract_headers`]. Fails with [`MailError::InputUnavailable`] before
/// writing anything if the file cannot be opened.
pub fn extract_headers_file<W: Write>(path: &Path, writer: &mut W) -> Result<()> {
    let mut reader = open(path)?;
    extract_headers(&mut reader, writer)
}

/// Open `path` and run [`extract_body`].
pub fn extract_body_file<W: Write>(path: &Path, writer: &mut W) -> Result<()> {
    let mut reader = open(path)?;
    extract_body(&mut reader, writer)
}

/// Open `path` and run [`filter_headers`].
pub fn filter_headers_file<W: Write>(
    path: &Path,
    writer: &mut W,
    removal: &RemovalList,
) -> Result<FilterStats> {
    let mut reader = open(path)?;
    filter_headers(&mut reader, writer, removal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn headers_from_reader() {
        let mut out = Vec::new();
        extract_headers(&mut Cursor::new(&b"Subject: A\r\n B\r\n\r\nbody\r\n"[..]), &mut out).unwrap();
        assert_eq!(out, b"Subject: A B\n");
    }

    #[test]
    fn body_from_reader() {
        let mut out = Vec::new();
        extract_body(&mut Cursor::new(&b"X: 1\n\n body line\n"[..]), &mut out).unwrap();
        assert_eq!(out, b" body line\n");
    }

    #[test]
    fn for_each_line_stops_on_done() {
        let mut seen = Vec::new();
        for_each_line(&mut Cursor::new(&b"a\nb\nc"[..]), |line| {
            seen.push(line.to_vec());
            Ok(if line == b"b\n" { Flow::Done } else { Flow::Continue })
        })
        .unwrap();
        assert_eq!(seen, vec![b"a\n".to_vec(), b"b\n".to_vec()]);
    }

    #[test]
    fn write_errors_are_reported() {
        let err = filter_headers(
            &mut Cursor::new(&b"A: 1\n\nbody\n"[..]),
            &mut FailingWriter,
            &RemovalList::empty(),
        )
        .unwrap_err();
        assert!(matches!(err, MailError::Io(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn missing_file_is_input_unavailable() {
        let mut out = Vec::new();
        let err = extract_body_file(Path::new("/nonexistent/message.eml"), &mut out).unwrap_err();
        assert!(matches!(err, MailError::InputUnavailable { .. }));
        assert!(err.to_string().starts_with("/nonexistent/message.eml: cannot open:"));
        assert!(out.is_empty());
    }
}
