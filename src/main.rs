mod cli;

use std::process;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use prime_after::{
    find_after, format_table, next_prime, verify_table, GeneratorConfig, PrimeTable, PRIME_LIST,
};
use tracing::info;

use cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Find { n, exact } => find(n, exact),
        Command::Generate {
            limit,
            growth,
            per_line,
        } => {
            let primes = generate(GeneratorConfig { limit, growth })?;
            println!("{}", format_table(primes, per_line));
            Ok(())
        }
        Command::Verify { against_sieve } => verify(against_sieve),
    }
}

fn find(n: i64, exact: bool) -> Result<()> {
    let prime = find_after(n).with_context(|| format!("No tabulated prime after {n}"))?;
    if !exact {
        println!("{prime}");
        return Ok(());
    }
    let next = next_prime(n.max(0) as u64);
    println!(
        "{prime} (next prime {next}, gap {})",
        u64::from(prime).saturating_sub(next)
    );
    Ok(())
}

fn generate(config: GeneratorConfig) -> Result<Vec<u32>> {
    let start = Instant::now();
    let primes: Vec<u32> = config
        .generate()
        .context("Cannot generate table")?
        .collect();
    info!(
        count = primes.len(),
        limit = config.limit,
        elapsed = ?start.elapsed(),
        "generated table"
    );
    Ok(primes)
}

fn verify(against_sieve: bool) -> Result<()> {
    verify_table(&PrimeTable::STANDARD).context("Embedded table failed verification")?;
    println!("{} entries verified prime", PRIME_LIST.len() - 1);

    if against_sieve {
        let generated = generate(GeneratorConfig::default())?;
        let embedded = &PRIME_LIST[1..];
        if let Some((i, (g, e))) = generated
            .iter()
            .zip(embedded)
            .enumerate()
            .find(|(_, (g, e))| g != e)
        {
            bail!("Entry {} differs: sieve produced {g}, table has {e}", i + 1);
        }
        if generated.len() != embedded.len() {
            bail!(
                "Sieve produced {} entries, table has {}",
                generated.len(),
                embedded.len()
            );
        }
        println!("Embedded table matches a fresh sieve");
    }
    Ok(())
}
