/*
 * policy.rs
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

//! Removal policy: `(base - preserve) + extra`, compiled into a [`RemovalList`].

use globset::{GlobSet, GlobSetBuilder};
use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use super::builtin::BUILTIN_REMOVAL_PATTERNS;
use super::pattern::compile_pattern;
use crate::config::PolicyConfig;
use crate::error::PolicyError;

/// Split a comma-separated source into patterns. Tokens are trimmed; empty tokens are dropped.
/// Returns None for an empty or whitespace-only source, which means "not configured".
pub fn parse_pattern_list(source: &str) -> Option<Vec<String>> {
    if source.trim().is_empty() {
        return None;
    }
    Some(
        source
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Ordered, immutable list of removal patterns with a compiled matcher.
/// Safe to share between threads; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct RemovalList {
    patterns: Vec<String>,
    set: GlobSet,
}

impl RemovalList {
    /// A list that removes nothing.
    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    /// Compile patterns as given, without applying any policy step.
    pub fn from_patterns(patterns: Vec<String>) -> Result<Self, PolicyError> {
        let mut builder = GlobSetBuilder::new();
        for p in &patterns {
            builder.add(compile_pattern(p)?);
        }
        let set = builder.build().map_err(|e| PolicyError::InvalidPattern {
            pattern: patterns.join(","),
            message: e.to_string(),
        })?;
        Ok(Self { patterns, set })
    }

    /// True if any pattern matches the whole header name (case-insensitively).
    pub fn matches_any(&self, header_name: &str) -> bool {
        !self.patterns.is_empty() && self.set.is_match(header_name)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(String::as_str)
    }
}

impl Default for RemovalList {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for RemovalList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.patterns)
    }
}

/// Builds the final removal list from a [`PolicyConfig`]. Reads no ambient state.
pub struct RemovalPolicyBuilder<'a> {
    config: &'a PolicyConfig,
}

impl<'a> RemovalPolicyBuilder<'a> {
    pub fn new(config: &'a PolicyConfig) -> Self {
        Self { config }
    }

    /// Surviving base entries in their original order, then extras not already present.
    /// Preserve and extra comparisons are exact, case-insensitive string comparisons of the
    /// pattern text; wildcards are not expanded.
    pub fn build(&self) -> Result<RemovalList, PolicyError> {
        let builtin;
        let base: &[String] = match &self.config.base {
            Some(list) => list,
            None => {
                builtin = BUILTIN_REMOVAL_PATTERNS
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>();
                &builtin
            }
        };
        let preserve: &[String] = self.config.preserve.as_deref().unwrap_or(&[]);
        let extra: &[String] = self.config.extra.as_deref().unwrap_or(&[]);

        let mut patterns: Vec<String> = Vec::new();
        patterns
            .try_reserve_exact(base.len() + extra.len())
            .map_err(|_| PolicyError::ResourceExhausted)?;

        for entry in base {
            if !contains_ignore_case(preserve, entry) {
                patterns.push(entry.clone());
            }
        }
        let surviving = patterns.len();
        for entry in extra {
            if !contains_ignore_case(&patterns, entry) {
                patterns.push(entry.clone());
            }
        }
        debug!(
            "[policy] {} removal patterns ({} of {} base kept, {} extra added)",
            patterns.len(),
            surviving,
            base.len(),
            patterns.len() - surviving
        );
        RemovalList::from_patterns(patterns)
    }

    /// Like [`build`](Self::build), but a failure yields an empty list so that every header
    /// is kept rather than the message being lost.
    pub fn build_or_empty(&self) -> RemovalList {
        match self.build() {
            Ok(list) => list,
            Err(e) => {
                warn!("[policy] {}; no headers will be removed", e);
                RemovalList::empty()
            }
        }
    }
}

fn contains_ignore_case(list: &[String], entry: &str) -> bool {
    list.iter().any(|p| p.eq_ignore_ascii_case(entry))
}
