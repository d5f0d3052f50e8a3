//! # json-toolkit entry point
//!
//! ```text
//! main()
//!   │
//!   ├─> Initialise logging (tracing-subscriber, RUST_LOG)
//!   │
//!   ├─> Parse CLI arguments (clap)
//!   │
//!   ├─> If an operation subcommand is given:
//!   │   └─> Load the input, run the operation, print the outcome
//!   │
//!   └─> Otherwise:
//!       └─> Interactive menu loop on stdin/stdout
//! ```
//!
//! ```bash
//! json-toolkit dedup -i records.json -o unique.json
//! json-toolkit search -i records.json -k "alpha, beta" -o matched.json --stats stats.csv
//! json-toolkit            # interactive menu
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout)] // Results are printed for the operator

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    json_toolkit::logging::init()?;

    let cli = cli::Cli::parse();
    cli::run(cli)
}
