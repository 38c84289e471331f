//! `wkpdf` binary.
//!
//! Positional inputs become pages (`-` reads one page from stdin), flags fill the global
//! and page options, and the PDF goes to `--output` or stdout. `--print-args` shows the
//! wkhtmltopdf command line without running it.

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}
