mod cli;
mod engine;
mod load;
mod prelude;
mod quantity;
mod render;

use std::fs::File;

use clap::Parser;

use crate::{
    cli::Args,
    engine::{cycles::CycleStart, rates::RateBook},
    prelude::*,
};

fn main() -> Result {
    tracing_subscriber::fmt().with_target(false).compact().init();
    let args = Args::parse();

    let rates = match &args.rates {
        Some(path) => RateBook::from_toml_file(path)?,
        None => RateBook::default(),
    };

    let series = load::usage_series(&args.infile)?;

    let starts = if let Some(path) = &args.date_file {
        let file = File::open(path)
            .with_context(|| format!("failed to open date file {}", path.display()))?;
        load::cycle_starts(file)?
    } else if args.dates.is_empty() {
        // Whole export as a single cycle, labeled with its first date.
        CycleStart::covering(&series).into_iter().collect()
    } else {
        args.dates.iter().map(|date| CycleStart::parse(date)).collect::<Result<_>>()?
    };
    info!(n_cycles = starts.len(), "segmenting billing cycles");

    let estimates = engine::evaluate(&series, &starts, &rates);
    if estimates.is_empty() {
        bail!("no billing cycle matched any usage records");
    }

    if !args.silent {
        for estimate in &estimates {
            println!("\nBilling period {}: total usage {}", estimate.label, estimate.total_usage);
            println!("{}", render::build_basic_table(estimate));
            println!("{}", render::build_tou_table(estimate));
            println!("{}", render::build_peak_demand_table(estimate));
        }
        println!();
    }
    println!("{}", render::build_summary_table(&estimates));

    Ok(())
}
