#![warn(clippy::pedantic)]

mod config;
mod source;

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use bld_core::{
    CornerSlot, Criteria, EdgeSlot, GenerateReport, GenerateRequest, MoveSequence,
    ScrambleFilter, generate_scrambles,
};
use clap::{ArgAction, Args, Parser, Subcommand, value_parser};
use color_eyre::{
    eyre::{WrapErr, eyre},
    owo_colors::OwoColorize,
};
use config::Config;
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, debug, info};
use source::{LineSource, RandomMoveSource};

/// Generates 3x3 scrambles for blindfolded solving, filtered by how hard
/// they are to solve
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The configuration file to use instead of the one in the user config
    /// directory
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// The logging verbosity. Can be set zero to three times.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the solving metrics of one scramble
    Check {
        /// The scramble, for example "R U R' U'"
        scramble: String,
        #[command(flatten)]
        buffers: BufferArgs,
        #[command(flatten)]
        criteria: CriteriaArgs,
    },
    /// Generate random scrambles and scrambles that match the given criteria
    Generate {
        /// How many scrambles must match the criteria
        #[arg(long, default_value_t = 1, value_parser = value_parser!(u16).range(0..=50))]
        custom: u16,
        /// How many unfiltered scrambles to add
        #[arg(long, default_value_t = 0, value_parser = value_parser!(u16).range(0..=100))]
        random: u16,
        #[command(flatten)]
        criteria: CriteriaArgs,
        #[command(flatten)]
        buffers: BufferArgs,
        /// Give up looking for matching scrambles after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout_secs: Option<u64>,
        /// Read candidate scrambles from this file, one per line, instead of
        /// generating them. `-` reads stdin.
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Seed for scramble generation and output order
        #[arg(long)]
        seed: Option<u64>,
        /// Print random scrambles first, then matching ones, instead of
        /// mixing them
        #[arg(long)]
        no_shuffle: bool,
    },
}

#[derive(Args)]
struct BufferArgs {
    /// The edge buffer, for example UF or DF
    #[arg(long, value_name = "SLOT")]
    edge_buffer: Option<EdgeSlot>,
    /// The corner buffer, for example UFR or UFL
    #[arg(long, value_name = "SLOT")]
    corner_buffer: Option<CornerSlot>,
}

/// Criteria given on the command line. These override the ones from the
/// configuration file one by one.
#[derive(Args)]
struct CriteriaArgs {
    /// Required number of algorithms
    #[arg(long, value_name = "N")]
    algs: Option<u32>,
    /// Required number of flipped edges
    #[arg(long, value_name = "N", value_parser = value_parser!(u32).range(0..=11))]
    flips: Option<u32>,
    /// Required number of twisted corners
    #[arg(long, value_name = "N", value_parser = value_parser!(u32).range(0..=7))]
    twists: Option<u32>,
    /// Whether the scramble must have parity
    #[arg(long, value_name = "BOOL")]
    parity: Option<bool>,
    /// Whether the edges must be able to float
    #[arg(long, value_name = "BOOL")]
    float_edges: Option<bool>,
    /// Whether the corners must be able to float
    #[arg(long, value_name = "BOOL")]
    float_corners: Option<bool>,
}

impl CriteriaArgs {
    fn over(&self, base: Criteria) -> Criteria {
        Criteria {
            algorithm_count: self.algs.or(base.algorithm_count),
            flip_count: self.flips.or(base.flip_count),
            twist_count: self.twists.or(base.twist_count),
            has_parity: self.parity.or(base.has_parity),
            can_float_edges: self.float_edges.or(base.can_float_edges),
            can_float_corners: self.float_corners.or(base.can_float_corners),
        }
    }
}

fn filter_from(config: &Config, buffers: &BufferArgs, criteria: &CriteriaArgs) -> ScrambleFilter {
    ScrambleFilter::new(
        buffers.edge_buffer.unwrap_or(config.edge_buffer),
        buffers.corner_buffer.unwrap_or(config.corner_buffer),
        criteria.over(config.criteria),
    )
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn check(scramble: &str, filter: &ScrambleFilter) -> color_eyre::Result<()> {
    let metrics = filter.evaluate(scramble)?;
    let moves: MoveSequence = scramble.parse()?;

    println!("Scramble:          {moves}");
    println!(
        "Buffers:           {} / {}",
        filter.edge_buffer, filter.corner_buffer
    );
    println!("Algorithms:        {}", metrics.algorithm_count);
    println!("Parity:            {}", yes_no(metrics.has_parity));
    println!("Flipped edges:     {}", metrics.flip_count);
    println!("Twisted corners:   {}", metrics.twist_count);
    println!("Edges can float:   {}", yes_no(metrics.can_float_edges));
    println!("Corners can float: {}", yes_no(metrics.can_float_corners));
    println!(
        "Targets:           {} edge, {} corner",
        metrics.edge_targets, metrics.corner_targets
    );

    if !filter.criteria.is_any() {
        let verdict = if filter.criteria.matches(&metrics) {
            "matches".green().to_string()
        } else {
            "does not match".red().to_string()
        };
        println!("The scramble {verdict} the desired criteria");
    }

    Ok(())
}

fn run_generate(
    input: Option<&Path>,
    request: &GenerateRequest,
    rng: &mut fastrand::Rng,
    scramble_length: usize,
) -> color_eyre::Result<GenerateReport> {
    Ok(match input {
        Some(path) if path == Path::new("-") => {
            info!("Reading candidate scrambles from stdin");
            generate_scrambles(&mut LineSource::new(io::stdin().lock()), request)?
        }
        Some(path) => {
            info!("Reading candidate scrambles from {}", path.display());
            let file =
                File::open(path).wrap_err_with(|| format!("Failed to open {}", path.display()))?;
            generate_scrambles(&mut LineSource::new(BufReader::new(file)), request)?
        }
        None => {
            if scramble_length == 0 {
                return Err(eyre!("The scramble length must be at least one move"));
            }
            let mut source = RandomMoveSource::new(rng.fork(), scramble_length);
            generate_scrambles(&mut source, request)?
        }
    })
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            scramble,
            buffers,
            criteria,
        } => check(&scramble, &filter_from(&config, &buffers, &criteria))?,
        Commands::Generate {
            custom,
            random,
            criteria,
            buffers,
            timeout_secs,
            input,
            seed,
            no_shuffle,
        } => {
            let request = GenerateRequest {
                random_count: random.into(),
                custom_count: custom.into(),
                filter: filter_from(&config, &buffers, &criteria),
                time_budget: timeout_secs.map_or(config.time_budget(), Duration::from_secs),
            };
            debug!("{request:?}");

            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

            eprintln!("Generating scrambles...");
            let report = run_generate(
                input.as_deref(),
                &request,
                &mut rng,
                config.scramble_length,
            )?;

            let mut scrambles = report.random.iter().chain(&report.custom).collect_vec();
            if !no_shuffle {
                rng.shuffle(&mut scrambles);
            }
            for scramble in scrambles {
                println!("{scramble}");
            }

            eprintln!(
                "Checked {} scramble(s) ({:.2}s) and found {} scramble(s) that match the desired criteria as well as {} random scramble(s).",
                report.examined,
                report.elapsed.as_secs_f64(),
                report.custom.len(),
                report.random.len(),
            );
            if report.invalid > 0 {
                eprintln!(
                    "Skipped {} line(s) that are not valid scrambles.",
                    report.invalid
                );
            }
            if report.random.len() < request.random_count {
                eprintln!(
                    "{}",
                    format!(
                        "The input ran out after {} of {} random scrambles.",
                        report.random.len(),
                        request.random_count
                    )
                    .red()
                );
            }
            if report.shortfall(&request) > 0 {
                let reason = if report.source_exhausted {
                    "The input ran out of scrambles."
                } else {
                    "This likely means the request timed out. Try setting easier parameters or generating fewer custom scrambles."
                };
                eprintln!(
                    "{}",
                    format!("Failed to generate all requested custom scrambles. {reason}").red()
                );
            }
        }
    }

    Ok(())
}
