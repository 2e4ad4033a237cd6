/*
 * error.rs
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

//! Error types for message processing and policy construction.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from the extraction and filtering entry points.
#[derive(Debug, Error)]
pub enum MailError {
    /// The named input could not be opened. Nothing has been written.
    #[error("{}: cannot open: {}", .path.display(), .source)]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading the message or writing the output failed part way through.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The configuration file is unreadable or malformed.
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Failures while building a [`RemovalList`](crate::header::RemovalList).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The pattern list could not be allocated.
    #[error("not enough memory to build the header removal list")]
    ResourceExhausted,
    /// A pattern could not be compiled, even as a literal.
    #[error("invalid removal pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
}

pub type Result<T> = std::result::Result<T, MailError>;
