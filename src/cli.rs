//! Command-line argument parsing for the table maintenance tool

use clap::{Parser, Subcommand};

/// Look up and maintain the prime-after table
#[derive(Parser, Debug)]
#[command(name = "prime-after")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the tabulated prime after N
    Find {
        #[arg(allow_negative_numbers = true)]
        n: i64,

        /// Also print the exact next prime and the gap to the table entry
        #[arg(long)]
        exact: bool,
    },

    /// Regenerate the table with a sieve and print it as an array body
    Generate {
        /// Exclusive upper bound of the sieve
        #[arg(short, long, default_value_t = i32::MAX as u32)]
        limit: u32,

        /// Spacing between consecutive entries, must be above 1.0
        #[arg(short, long, default_value_t = 1.1)]
        growth: f32,

        /// Values per output line
        #[arg(long, default_value_t = 6)]
        per_line: usize,
    },

    /// Check every embedded entry for primality
    Verify {
        /// Also regenerate the table and compare it with the embedded one
        #[arg(long)]
        against_sieve: bool,
    },
}

impl Cli {
    pub fn init_logging(&self) {
        use tracing_subscriber::{fmt, EnvFilter};

        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
