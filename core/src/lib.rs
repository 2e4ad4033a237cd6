/*
 * lib.rs
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

//! mailheaderclean core: split email messages into header and body, unfold folded header
//! fields, and strip non-essential header fields according to a removal policy.
//!
//! Three mutually exclusive operations, each a single pass over one message:
//! - [`message::extract_headers`]: the header block with continuation lines joined;
//! - [`message::extract_body`]: everything after the first blank line;
//! - [`message::filter_headers`]: the whole message minus removed fields and extra Received fields.
//!
//! The removal policy is built from an explicit [`config::PolicyConfig`] by
//! [`header::RemovalPolicyBuilder`]; async variants live in [`stream`].

pub mod config;
pub mod error;
pub mod header;
pub mod message;
pub mod stream;

pub use config::PolicyConfig;
pub use error::{MailError, PolicyError, Result};
pub use header::{RemovalList, RemovalPolicyBuilder};
