//! `toy-metro`: samples the posterior `2p` of a coin that came up heads once, and
//! prints how the running mean approaches 2/3.

use std::io::{self, BufWriter, Write};

use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use toy_metro::config::RunConfig;
use toy_metro::metropolis::MetropolisSampler;
use toy_metro::report::TextReport;
use toy_metro::rng::Drand48;

/// Metropolis sampler for Pr(p | heads) = 2p
///
/// Prints the iteration, chain value, running mean and number of accepted
/// proposals every `report-interval` iterations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// starting value of the chain, in (0, 1]
    #[arg(long, default_value_t = 0.5)]
    x0: f64,

    /// full width of the uniform proposal step, in (0, 2]
    #[arg(short, long, default_value_t = 0.4)]
    width: f64,

    /// number of iterations
    #[arg(short = 'n', long, default_value_t = 100_000)]
    iterations: usize,

    /// iterations between diagnostic records
    #[arg(short, long, default_value_t = 100)]
    report_interval: usize,

    /// random seed (default: current time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// random number generator
    #[arg(long, value_enum, default_value_t = RngKind::Small)]
    rng: RngKind,

    /// show a progress bar on stderr
    #[arg(long, default_value_t = false)]
    progress: bool,

    /// also write the records to this CSV file (needs the `csv` feature)
    #[arg(long)]
    csv: Option<Box<str>>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[clap(rename_all = "lowercase")]
enum RngKind {
    /// rand's small fast generator
    Small,
    /// the POSIX drand48 sequence, to replay runs of the C toy program
    Drand48,
}

impl Cli {
    fn config(&self) -> RunConfig {
        let config = RunConfig::default()
            .set_initial_state(self.x0)
            .set_width(self.width)
            .set_iterations(self.iterations)
            .set_report_interval(self.report_interval);
        match self.seed {
            Some(seed) => config.set_seed(seed),
            None => config,
        }
    }
}

fn progress_bar(cli: &Cli) -> anyhow::Result<ProgressBar> {
    if !cli.progress {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::with_draw_target(
        Some(cli.iterations as u64),
        ProgressDrawTarget::stderr(),
    );
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    Ok(pb)
}

fn sample<R: Rng + SeedableRng>(cli: &Cli) -> anyhow::Result<()> {
    let mut sampler = MetropolisSampler::<R>::new(cli.config())?;
    if let Some(seed) = sampler.config().seed {
        info!("seed = {seed}, rng = {:?}", cli.rng);
    }

    let pb = progress_bar(cli)?;
    let mut text = TextReport::new(BufWriter::new(io::stdout().lock()));

    match cli.csv.as_deref() {
        Some(path) => run_with_csv(&mut sampler, text, path, &pb)?,
        None => {
            sampler.run_with_progress(&mut text, &pb)?;
        }
    }
    pb.finish_and_clear();
    Ok(())
}

#[cfg(feature = "csv")]
fn run_with_csv<R: Rng, W: Write>(
    sampler: &mut MetropolisSampler<R>,
    text: TextReport<W>,
    path: &str,
    pb: &ProgressBar,
) -> anyhow::Result<()> {
    let csv = toy_metro::io::CsvReport::from_path(path)?;
    sampler.run_with_progress(&mut (text, csv), pb)?;
    info!("wrote records to {path}");
    Ok(())
}

#[cfg(not(feature = "csv"))]
fn run_with_csv<R: Rng, W: Write>(
    _sampler: &mut MetropolisSampler<R>,
    _text: TextReport<W>,
    path: &str,
    _pb: &ProgressBar,
) -> anyhow::Result<()> {
    anyhow::bail!("cannot write {path}: built without the `csv` feature")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.rng {
        RngKind::Small => sample::<SmallRng>(&cli),
        RngKind::Drand48 => sample::<Drand48>(&cli),
    }
}
