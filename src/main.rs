//! Command-line driver.
//!
//! Runs one trial with the requested target and prints whether it
//! percolated. With `--trials`, also runs that many exhaustive-growth
//! trials and prints the sampled CDF followed by the summary statistics.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};

use percolate::experiment::Experiment;
use percolate::params::TrialParams;
use percolate::random::{create_rng, entropy_rng};
use percolate::trial::Trial;

/// Continuum percolation on a square lattice
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Lattice side L (> 1)
    side: usize,
    /// Bonding radius R (> 0)
    radius: usize,
    /// Target particle count N (> 0)
    target: usize,
    /// Number of exhaustive-growth trials for the statistics
    #[arg(short, long)]
    trials: Option<usize>,
    /// Seed for reproducible runs; drawn from the OS when omitted
    #[arg(short, long)]
    seed: Option<u64>,
    /// Write the first trial's lattice snapshot as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
    /// Also log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(args: &Args) -> Result<()> {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ));
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }
    CombinedLogger::init(loggers).context("installing logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let params = TrialParams::new(args.side, args.radius, args.target)?;
    let mut rng = match args.seed {
        Some(seed) => create_rng(seed),
        None => entropy_rng(),
    };
    info!(
        "L={} R={} N={} seed={:?}",
        params.side(),
        params.radius(),
        params.target(),
        args.seed
    );

    let mut trial = Trial::new(params);
    let outcome = trial.run(&mut rng);
    println!("{}", outcome.percolates);

    if let Some(path) = &args.snapshot {
        let file = File::create(path)
            .with_context(|| format!("creating snapshot {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &trial.snapshot())
            .context("writing snapshot")?;
        writer.flush().context("flushing snapshot")?;
        info!("snapshot written to {}", path.display());
    }

    let Some(trials) = args.trials else {
        return Ok(());
    };

    let report = Experiment::new(params, trials)?.run(&mut rng);
    let Some(summary) = report.summary else {
        anyhow::bail!(
            "only {} of {} trials percolated, need at least two for statistics",
            report.counts.len(),
            report.trials
        );
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for point in &summary.cdf {
        writeln!(out, "{}\t{}", point.value, point.fraction)?;
    }
    writeln!(out, "Mean: {}", summary.mean)?;
    writeln!(out, "Deviation: {}", summary.std_dev)?;
    let (lower, upper) = summary.confidence_interval;
    writeln!(out, "95 percent confidence interval: ({lower}, {upper})")?;
    Ok(())
}
