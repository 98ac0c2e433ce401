//! vec4len CLI
//!
//! Repeated timed executions of the Vec4 length summation

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vec4len::{Backend, PopulateConfig, DEFAULT_COUNT, DEFAULT_SEED};
use vec4len_cli::{output, OutputFormat};

#[derive(Parser)]
#[command(name = "vec4len")]
#[command(author, version, about = "Euclidean length of 4-lane f32 vectors across SIMD backends")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time repeated summation passes over a seeded array
    Run {
        /// Backend to run (scalar, sse2, sse4.1, avx, neon, wasm-simd, auto)
        #[arg(short, long, default_value = "auto")]
        backend: Backend,

        /// Number of vectors in the array
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Generator seed
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Number of timed passes
        #[arg(short, long, default_value_t = 10)]
        iterations: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that every available backend agrees with the scalar sum
    Verify {
        /// Number of vectors in the array
        #[arg(short = 'n', long, default_value_t = DEFAULT_COUNT)]
        count: usize,

        /// Generator seed
        #[arg(short, long, default_value_t = DEFAULT_SEED)]
        seed: u64,

        /// Relative tolerance against the scalar sum
        #[arg(short, long, default_value_t = 1e-5)]
        tolerance: f32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List backends and their availability on this CPU
    Backends {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> vec4len_cli::Result<()> {
    match cli.command {
        Commands::Run {
            backend,
            count,
            seed,
            iterations,
            json,
        } => {
            let config = PopulateConfig::new()
                .with_count(count)
                .with_seed(seed)
                .with_backend(backend);
            let report = vec4len_cli::run_benchmark(&config, iterations)?;
            output::write_report(&report, OutputFormat::from_json_flag(json), output::format_run)?;
        }

        Commands::Verify {
            count,
            seed,
            tolerance,
            json,
        } => {
            let config = PopulateConfig::new().with_count(count).with_seed(seed);
            let report = vec4len_cli::verify(&config, tolerance)?;
            output::write_report(&report, OutputFormat::from_json_flag(json), output::format_verify)?;
        }

        Commands::Backends { json } => {
            let report = vec4len_cli::list_backends();
            output::write_report(&report, OutputFormat::from_json_flag(json), output::format_backends)?;
        }
    }

    Ok(())
}
