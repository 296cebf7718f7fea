//! # bm25ctf CLI
//!
//! Scores documents from a statistics file, prints explanation trees, and
//! exposes the norm codec. Run `bm25ctf --help` for usage information.

mod cli;
mod input;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::run()
}
