/*
 * mod.rs
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

//! Line-oriented header processing: folding, body extraction, and removal-policy filtering
//! (push model: each engine is fed one raw line at a time and writes through a callback).

mod body;
mod builtin;
mod filter;
mod folder;
mod line;
mod pattern;
mod policy;

pub use body::BodyExtractor;
pub use builtin::BUILTIN_REMOVAL_PATTERNS;
pub use filter::{FilterState, FilterStats, HeaderFilter, MAX_FIELD_NAME_LEN};
pub use folder::HeaderFolder;
pub use line::{is_blank, is_continuation, normalize_in_place, normalize_line, Flow};
pub use pattern::{matches, PatternMatcher};
pub use policy::{parse_pattern_list, RemovalList, RemovalPolicyBuilder};
