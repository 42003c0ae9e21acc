//! `collection-json` — validate and normalize a Collection+JSON document.
//!
//! Usage:
//!   collection-json [FILE]
//!
//! Reads FILE, or stdin when no argument is given, validates it and prints
//! it to stdout as compact JSON. Set `RUST_LOG=debug` for parse diagnostics.

use std::fs::File;
use std::io::{self, Write};

use collection_json::cli::normalize_reader;
use collection_json::ParseOptions;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let options = ParseOptions::default();
    let result = match std::env::args().nth(1) {
        Some(path) => match File::open(&path) {
            Ok(file) => normalize_reader(file, options),
            Err(e) => {
                eprintln!("{path}: {e}");
                std::process::exit(1);
            }
        },
        None => normalize_reader(io::stdin().lock(), options),
    };

    match result {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{output}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
