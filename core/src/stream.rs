/*
 * stream.rs
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

//! Async entry points for hosts running on tokio. Same engines as [`crate::message`]; each
//! line's output is collected and written before the next line is read.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{MailError, Result};
use crate::header::{BodyExtractor, FilterStats, Flow, HeaderFilter, HeaderFolder, RemovalList};

async fn drive<R, W, F>(reader: &mut R, writer: &mut W, mut step: F) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    F: FnMut(&[u8], &mut Vec<u8>) -> Flow,
{
    let mut line = Vec::new();
    let mut out = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(());
        }
        out.clear();
        let flow = step(&line, &mut out);
        if !out.is_empty() {
            writer.write_all(&out).await?;
        }
        if flow == Flow::Done {
            return Ok(());
        }
    }
}

pub async fn extract_headers_async<R, W>(reader: &mut R, writer: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut folder = HeaderFolder::new();
    drive(reader, writer, |line, out| {
        folder.process_line(line, |s| out.extend_from_slice(s))
    })
    .await?;
    let mut tail = Vec::new();
    folder.finish(|s| tail.extend_from_slice(s));
    writer.write_all(&tail).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn extract_body_async<R, W>(reader: &mut R, writer: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut extractor = BodyExtractor::new();
    drive(reader, writer, |line, out| {
        extractor.process_line(line, |s| out.extend_from_slice(s))
    })
    .await?;
    writer.flush().await?;
    Ok(())
}

/// Filter one message. `removal` is only read, so a single list (e.g. in an `Arc`) can serve
/// any number of concurrent messages.
pub async fn filter_headers_async<R, W>(
    reader: &mut R,
    writer: &mut W,
    removal: &RemovalList,
) -> Result<FilterStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut filter = HeaderFilter::new(removal);
    drive(reader, writer, |line, out| {
        filter.process_line(line, |s| out.extend_from_slice(s))
    })
    .await?;
    writer.flush().await?;
    Ok(filter.stats())
}

/// Open `path` and run [`filter_headers_async`].
pub async fn filter_headers_file_async<W>(
    path: &Path,
    writer: &mut W,
    removal: &RemovalList,
) -> Result<FilterStats>
where
    W: AsyncWrite + Unpin,
{
    let file = File::open(path)
        .await
        .map_err(|source| MailError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
    let mut reader = BufReader::new(file);
    filter_headers_async(&mut reader, writer, removal).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn folds_headers() {
        let mut input: &[u8] = b"Subject: A\r\n B\r\n\r\nbody\r\n";
        let mut out = Vec::new();
        extract_headers_async(&mut input, &mut out).await.unwrap();
        assert_eq!(out, b"Subject: A B\n");
    }

    #[tokio::test]
    async fn extracts_body() {
        let mut input: &[u8] = b"X: 1\n\n body line\n";
        let mut out = Vec::new();
        extract_body_async(&mut input, &mut out).await.unwrap();
        assert_eq!(out, b" body line\n");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn shared_policy_across_tasks() {
        let removal = Arc::new(RemovalList::from_patterns(vec!["X-*".to_string()]).unwrap());
        let mut handles = Vec::new();
        for i in 0..4 {
            let removal = Arc::clone(&removal);
            handles.push(tokio::spawn(async move {
                let msg = format!("X-Id: {}\nReceived: a\nReceived: b\nSubject: {}\n\nbody\n", i, i);
                let mut input = msg.as_bytes();
                let mut out = Vec::new();
                filter_headers_async(&mut input, &mut out, &removal).await.unwrap();
                (i, out)
            }));
        }
        for handle in handles {
            let (i, out) = handle.await.unwrap();
            assert_eq!(out, format!("Received: a\nSubject: {}\n\nbody\n", i).into_bytes());
        }
    }

    #[tokio::test]
    async fn missing_file_is_input_unavailable() {
        let mut out = Vec::new();
        let err = filter_headers_file_async(Path::new("/nonexistent/m.eml"), &mut out, &RemovalList::empty())
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::InputUnavailable { .. }));
    }
}
