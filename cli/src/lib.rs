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

//! Shared plumbing for the mailheader, mailmessage and mailheaderclean executables: logging
//! setup, stdout handling, exit status, and policy listing.

use std::io::{self, BufWriter, StdoutLock};
use std::process::ExitCode;

use clap::ValueEnum;
use mailheaderclean_core::{MailError, RemovalList};
use tracing_subscriber::EnvFilter;

/// Exit status when the input cannot be opened or processing fails. Usage errors exit with 2
/// (clap's default).
pub const EXIT_FAILURE: u8 = 1;

/// Log to stderr. RUST_LOG wins unless `verbose` asks for debug output; the default is warn.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn stdout_writer() -> BufWriter<StdoutLock<'static>> {
    BufWriter::new(io::stdout().lock())
}

/// Print the error (with its context chain) and map the outcome to an exit status.
pub fn finish(program: &str, result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<MailError>() {
                Some(MailError::InputUnavailable { .. }) => eprintln!("{}: {}", program, e),
                _ => eprintln!("{}: {:#}", program, e),
            }
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

/// Output format for `mailheaderclean -l`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// One pattern per line
    #[default]
    Text,
    /// JSON array of patterns
    Json,
}

pub fn format_policy(removal: &RemovalList, format: ListFormat) -> anyhow::Result<String> {
    Ok(match format {
        ListFormat::Text => removal.iter().map(|p| format!("{}\n", p)).collect::<String>(),
        ListFormat::Json => {
            let mut s = serde_json::to_string_pretty(removal)?;
            s.push('\n');
            s
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_listing_is_one_pattern_per_line() {
        let removal = RemovalList::from_patterns(vec!["A".into(), "X-*".into()]).unwrap();
        assert_eq!(format_policy(&removal, ListFormat::Text).unwrap(), "A\nX-*\n");
    }

    #[test]
    fn json_listing_is_an_array() {
        let removal = RemovalList::from_patterns(vec!["A".into()]).unwrap();
        let json = format_policy(&removal, ListFormat::Json).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec!["A".to_string()]);
    }

    #[test]
    fn empty_policy_lists_nothing() {
        assert_eq!(format_policy(&RemovalList::empty(), ListFormat::Text).unwrap(), "");
    }
}
