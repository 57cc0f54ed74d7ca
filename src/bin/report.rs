//! Command-line front end for the traversal report generator.
//!
//! Usage:
//!   trefoil-report <MODE> <FILE>
//!
//! where `MODE` is one of `ascending`, `descending` or `breadth` and
//! `FILE` holds whitespace-separated integer-key/string-value pairs. The
//! report goes to stdout; any failure (unreadable file, unknown mode, a
//! checksum that leaves the 32-bit range) is reported on stderr and the
//! process exits non-zero.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use trefoil::report::{load_pairs, write_report, Mode};
use trefoil::Tree;

#[derive(Parser)]
#[command(name = "trefoil-report")]
#[command(about = "Load key-value pairs into a 2-3 tree and print one traversal of it")]
struct Cli {
	/// Traversal order: ascending, descending or breadth
	mode: String,
	/// File of whitespace-separated integer-key/string-value pairs
	file: PathBuf,
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let mode: Mode = cli.mode.parse()?;
	let file = File::open(&cli.file)
		.with_context(|| format!("cannot open '{}'", cli.file.display()))?;

	let mut tree = Tree::new();
	load_pairs(BufReader::new(file), &mut tree)
		.with_context(|| format!("failed reading pairs from '{}'", cli.file.display()))?;

	let stdout = io::stdout();
	let mut out = stdout.lock();
	write_report(&tree, mode, &mut out)?;
	out.flush()?;
	Ok(())
}
