use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use luna::evaluate;

/// luna is a tree-walking interpreter for a subset of Lua 5.3.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path of the script file to execute.
    script: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let source = match fs::read_to_string(&args.script) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("failed to read '{}': {e}", args.script.display());
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = evaluate(&source) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
