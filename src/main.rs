use clap::{ArgAction, Parser, ValueEnum};
use log::{LevelFilter, info};

use dnc::harness::{BenchConfig, Harness, PeakAlloc, RankRule};

#[global_allocator]
static ALLOC: PeakAlloc = PeakAlloc::new();

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum RankArg {
    Median,
    LowerQuartile,
}

#[derive(Parser)]
#[command(
    name = "dnc-bench",
    about = "Time and memory of quickselect, inversion counting and closest pair",
    version
)]
struct Cli {
    /// Sequence sizes for selection and inversion counting.
    #[arg(long, value_delimiter = ',', default_values_t = [100, 1_000, 10_000, 100_000])]
    sizes: Vec<usize>,
    /// Point-set sizes for the closest-pair search.
    #[arg(
        long = "point-sizes",
        value_delimiter = ',',
        default_values_t = [10, 100, 1_000, 100_000]
    )]
    point_sizes: Vec<usize>,
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    #[arg(long, value_enum, default_value_t = RankArg::Median)]
    rank: RankArg,
    /// Select this rank for every size instead of using --rank.
    #[arg(long)]
    k: Option<usize>,
    /// Largest n cross-checked against the quadratic references.
    #[arg(long = "verify-limit", default_value_t = 2_000)]
    verify_limit: usize,
    #[arg(long = "no-verify")]
    no_verify: bool,
    /// More logging (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> BenchConfig {
        let rank = match (self.k, self.rank) {
            (Some(k), _) => RankRule::Fixed(k),
            (None, RankArg::Median) => RankRule::Median,
            (None, RankArg::LowerQuartile) => RankRule::LowerQuartile,
        };
        BenchConfig {
            array_sizes: self.sizes.clone(),
            point_sizes: self.point_sizes.clone(),
            seed: self.seed,
            rank,
            verify: !self.no_verify,
            verify_limit: self.verify_limit,
            ..BenchConfig::default()
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Returns whether every verified result matched its reference.
fn run(cli: &Cli) -> dnc::Result<bool> {
    let mut harness = Harness::new(cli.config(), Some(&ALLOC))?;
    info!("seed {}", harness.config().seed);

    let report = harness.run()?;
    println!("{report}");

    let failures = report.failures().count();
    if failures > 0 {
        eprintln!("{failures} result(s) disagreed with the reference");
    }
    Ok(failures == 0)
}
