/*
 * mailmessage.rs
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

//! mailmessage: print the body of a message (everything after the first blank line).

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mailheaderclean_cli::{finish, init_logging, stdout_writer};
use mailheaderclean_core::message::extract_body_file;

#[derive(Parser)]
#[command(name = "mailmessage")]
#[command(about = "Extract email message body from FILE (after first blank line)")]
#[command(version)]
struct Cli {
    /// Message file
    file: PathBuf,
    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let result = (|| -> anyhow::Result<()> {
        let mut out = stdout_writer();
        extract_body_file(&cli.file, &mut out)?;
        out.flush()?;
        Ok(())
    })();
    finish("mailmessage", result)
}
