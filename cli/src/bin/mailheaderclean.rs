/*
 * mailheaderclean.rs
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

//! mailheaderclean: print a message with non-essential headers removed, or list the active
//! removal policy.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use mailheaderclean_cli::{finish, format_policy, init_logging, stdout_writer, ListFormat};
use mailheaderclean_core::message::filter_headers_file;
use mailheaderclean_core::{PolicyConfig, RemovalPolicyBuilder};

const AFTER_HELP: &str = "\
Environment variables:
  MAILHEADERCLEAN           Comma-separated list replacing the built-in removal list
  MAILHEADERCLEAN_PRESERVE  Comma-separated list taken out of the removal list
  MAILHEADERCLEAN_EXTRA     Comma-separated list of additional headers to remove

Precedence: MAILHEADERCLEAN (or built-in) - PRESERVE + EXTRA.
Environment variables override the matching element of the configuration file.

Patterns use shell glob syntax and ignore case:
  X-*         any header starting with X-
  *-Status    any header ending with -Status
  X-MS-*      any header starting with X-MS-

Only the first Received header is kept.";

#[derive(Parser)]
#[command(name = "mailheaderclean")]
#[command(about = "Filter non-essential email headers from FILE, keeping routing headers and the body")]
#[command(version)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Message file
    #[arg(required_unless_present = "list", conflicts_with = "list")]
    file: Option<PathBuf>,
    /// List the active header removal list and exit
    #[arg(short = 'l', long = "list")]
    list: bool,
    /// Listing format for -l
    #[arg(long, value_enum, default_value_t = ListFormat::Text)]
    format: ListFormat,
    /// Configuration file (default: ~/.mailheaderclean/config.xml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = PolicyConfig::resolve(cli.config.as_deref()).context("cannot load configuration")?;
    let removal = RemovalPolicyBuilder::new(&config).build_or_empty();
    let mut out = stdout_writer();
    match &cli.file {
        Some(file) if !cli.list => {
            filter_headers_file(file, &mut out, &removal)?;
        }
        _ => {
            out.write_all(format_policy(&removal, cli.format)?.as_bytes())?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    finish("mailheaderclean", run(&cli))
}
