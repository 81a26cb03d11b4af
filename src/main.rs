mod estimate;
mod output;
mod ring;
mod sieve;
mod storage;
mod window;

use std::io;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::sieve::EngineError;
use crate::window::RankWindow;

#[derive(Parser)]
#[command(name = "nth-prime")]
#[command(about = "Print primes below 2^64 by rank", long_about = None)]
struct Cli {
    #[arg(
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Rank of the prime to print (1-based)"
    )]
    rank: u64,
    #[arg(
        value_parser = clap::value_parser!(u64).range(1..),
        help = "End of the rank range when >= the first argument, \
                otherwise a count of primes up to and including the first"
    )]
    second: Option<u64>,
    #[arg(short, long, help = "Print sieve sizing diagnostics to stderr")]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let window = RankWindow::from_args(cli.rank, cli.second);

    let start = Instant::now();

    let stream = match sieve::stream_primes(window) {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(exit_code(&e));
        }
    };

    if cli.verbose {
        eprintln!(
            "Window [{}, {}], sieve ring: {} slots",
            window.start,
            window.end,
            stream.ring_width()
        );
    }

    let emitted = match output::print_primes(stream, io::stdout().lock()) {
        Ok(emitted) => emitted,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            return ExitCode::from(5);
        }
    };

    let duration_us = start.elapsed().as_micros();

    let args = match cli.second {
        Some(second) => format!("{} {}", cli.rank, second),
        None => cli.rank.to_string(),
    };
    if let Err(e) = storage::log_execution(&args, emitted, duration_us) {
        eprintln!("Warning: Failed to log execution: {}", e);
    }

    ExitCode::SUCCESS
}

/// One distinct process exit code per engine failure, so scripts can tell
/// them apart without parsing stderr.
fn exit_code(e: &EngineError) -> u8 {
    match e {
        EngineError::RankTooLarge(_) => 2,
        EngineError::ResourceExhausted { .. } => 3,
        EngineError::InvalidWindow { .. } => 4,
    }
}
