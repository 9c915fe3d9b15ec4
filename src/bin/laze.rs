use std::fs;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Path to a source file to run.
    file: PathBuf,
}

fn main() -> ExitCode {
    simple_logger::init_with_level(log::Level::Warn).expect("failed to initialise logger");

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            error!("could not read '{}': {e}", cli.file.display());
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    let stdin = io::stdin();
    let mut stdin = BufReader::new(stdin.lock());

    if let Err(e) = laze::run(&source, &mut stdout, &mut stdin) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
