use anyhow::{Context, Result};
use clap::Parser;
use debt_engine::PayoffEngine;
use models::Debt;
use std::fs;
use std::path::PathBuf;

/// Prints a payoff plan for a debts.json file.
#[derive(Debug, Parser)]
#[command(name = "payoff-plan", version, about = "Compute a debt payoff plan", long_about = None)]
struct Args {
    /// Path to a JSON array of debts
    #[arg(short = 'd', long = "debts", default_value = "debts.json")]
    debts_path: PathBuf,

    /// Total amount available for debt payments each month
    #[arg(short = 'b', long = "budget")]
    monthly_budget: f64,

    /// avalanche, snowball, or compare to run both
    #[arg(short = 's', long = "strategy", default_value = "compare")]
    strategy: String,

    /// Simulation cap in months
    #[arg(long = "max-months", default_value_t = debt_engine::DEFAULT_MAX_MONTHS)]
    max_months: u32,

    /// Write the result here instead of stdout
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.debts_path)
        .with_context(|| format!("Reading debts file: {}", args.debts_path.display()))?;
    let debts: Vec<Debt> = serde_json::from_str(&raw)
        .with_context(|| format!("Parsing debts JSON in {}", args.debts_path.display()))?;

    let engine = PayoffEngine::new(args.max_months);
    let output = if args.strategy.eq_ignore_ascii_case("compare") {
        serde_json::to_string_pretty(&engine.compare(&debts, args.monthly_budget)?)?
    } else {
        serde_json::to_string_pretty(&engine.freedom_date(&debts, args.monthly_budget, &args.strategy)?)?
    };

    match args.out {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Writing {}", path.display()))?;
            println!("Plan written to {}", path.display());
        }
        None => println!("{}", output),
    }
    Ok(())
}
