use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sensorlink_cli::commands;
use sensorlink_cli::commands::listen::ListenOverrides;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sensorlink")]
#[command(about = "Sensorlink - serial telemetry gateway for masked sensor frames")]
#[command(long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read frames from the serial port and deliver decoded records
    Listen {
        /// Path to the configuration file
        #[arg(short, long, default_value = "sensorlink.toml")]
        config: PathBuf,

        /// Serial port path (overrides config)
        #[arg(short, long)]
        port: Option<String>,

        /// Baud rate (overrides config)
        #[arg(short, long)]
        baud: Option<u32>,

        /// Delivery endpoint (overrides config)
        #[arg(short, long, conflicts_with = "stdout")]
        url: Option<String>,

        /// Print records as JSON lines instead of delivering them
        #[arg(long)]
        stdout: bool,

        /// Number of records to process (0 = infinite)
        #[arg(short = 'n', long, default_value = "0")]
        count: u64,
    },

    /// Decode a captured serial stream
    Decode {
        /// Input capture file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Output JSON file for decoded records
        #[arg(short, long)]
        output: Option<String>,

        /// Show statistics only
        #[arg(long)]
        stats_only: bool,

        /// Bytes fed per simulated serial read
        #[arg(long, default_value = "64")]
        chunk_size: usize,
    },

    /// Encode raw samples into masked wire frames
    Encode {
        /// Input JSON file (array of samples)
        #[arg(short, long)]
        input: String,

        /// Output capture file
        #[arg(short, long)]
        output: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Listen {
            config,
            port,
            baud,
            url,
            stdout,
            count,
        } => commands::listen::execute(
            &config,
            ListenOverrides {
                port,
                baud,
                url,
                stdout,
                count,
            },
        ),

        Commands::Decode {
            input,
            output,
            stats_only,
            chunk_size,
        } => commands::decode::execute(&input, output.as_deref(), stats_only, chunk_size),

        Commands::Encode { input, output } => commands::encode::execute(&input, &output),
    }
}
