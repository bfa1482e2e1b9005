//! Streak Cube Puzzle Generator
//!
//! Builds banks of spatial-reasoning questions: each shows an arrangement of
//! colored cube streaks and four flat views of it, one of which is a mirror
//! image that no rotation of the arrangement can produce. Banks are rendered
//! to PNG images with a JSON manifest, and can be browsed in a 3D viewer.

mod visualization;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use streakview::config::BankConfig;
use streakview::generator::random_grid;
use streakview::render::PngRenderer;
use streakview::{persistence, BankBuilder, Direction, Palette, ReachableSet, Shape};

/// Generates "which view is impossible" spatial-reasoning puzzles.
#[derive(Parser)]
#[command(name = "streakview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a question bank and write its images and manifest.
    Generate(BankArgs),
    /// Print one seeded arrangement, its views and which mirror images are impossible.
    Check {
        /// Cells per grid edge.
        #[arg(long, default_value_t = 3)]
        size: usize,
        /// Comma-separated color tokens, painted in order.
        #[arg(long, value_delimiter = ',', default_value = "r,g,b")]
        palette: Vec<String>,
        #[arg(long, default_value_t = 60)]
        seed: u64,
    },
    /// Display a saved bank's arrangements in an interactive 3D viewer.
    Display(OutArgs),
    /// Show the number of questions in a saved bank.
    Count(OutArgs),
}

#[derive(Args)]
struct BankArgs {
    /// TOML file with seed, attempt cap and tiers.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the configured cap on regenerated arrangements per question.
    #[arg(long)]
    max_attempts: Option<usize>,
    #[command(flatten)]
    out: OutArgs,
}

#[derive(Args)]
struct OutArgs {
    /// Directory for images and the manifest.
    #[arg(long, default_value = "figures")]
    out: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Generate(args)) => run_generate(args),
        Some(Command::Check {
            size,
            palette,
            seed,
        }) => run_check(size, &palette, seed),
        Some(Command::Display(args)) => run_display(args),
        Some(Command::Count(args)) => run_count(args),
        None => run_generate(BankArgs {
            config: None,
            seed: None,
            max_attempts: None,
            out: OutArgs {
                out: PathBuf::from("figures"),
            },
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Generates a bank, renders it to PNG files and saves the manifest.
fn run_generate(args: BankArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => BankConfig::load(path)?,
        None => BankConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = max_attempts;
    }

    let mut builder = BankBuilder::from_config(&config)?;
    let mut renderer = PngRenderer::new(&args.out.out);
    let bank = builder.build(&mut renderer)?;
    persistence::save(&args.out.out, &bank)?;

    println!(
        "Generated {} questions with seed {}",
        bank.questions.len(),
        bank.seed
    );
    println!("Wrote images, bank.json and bank.txt to {}", args.out.out.display());
    Ok(())
}

/// Prints the first arrangement drawn from `seed`, without retrying.
fn run_check(size: usize, palette: &[String], seed: u64) -> Result<(), Box<dyn Error>> {
    let shape = Shape::cube(size)?;
    let palette = Palette::parse(palette)?;
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let (grid, streaks) = random_grid(&mut rng, shape, &palette)?;

    for streak in &streaks {
        println!(
            "{} streak from {:?} along {}, length {}",
            streak.color, streak.origin, streak.axis, streak.length
        );
    }
    println!();
    print!("{grid}");

    let reachable = ReachableSet::compute(&grid);
    for direction in Direction::ALL {
        println!("\nview {direction}:");
        print!("{}", reachable.base(direction));
        println!("mirrored:");
        print!("{}", reachable.mirrored(direction));
    }

    let impossible: Vec<String> = reachable
        .impossible_directions()
        .map(|direction| direction.to_string())
        .collect();
    println!();
    println!("{} distinct reachable views", reachable.distinct_len());
    if impossible.is_empty() {
        println!("No impossible view: every mirror image is reachable by a rotation");
    } else {
        println!("Impossible mirror images: {}", impossible.join(", "));
    }
    Ok(())
}

/// Loads a saved bank and displays its arrangements.
fn run_display(args: OutArgs) -> Result<(), Box<dyn Error>> {
    let manifest = persistence::load(&args.out)
        .ok_or_else(|| format!("No bank.json found in {}. Run 'streakview generate' first.", args.out.display()))?;
    let grids = manifest
        .questions
        .iter()
        .map(|record| Ok((record.index, record.grid()?)))
        .collect::<Result<Vec<_>, streakview::ConfigError>>()?;

    println!("Loaded {} questions", grids.len());
    println!("Controls: Left/Right navigate, Up/Down explode, R reset");
    visualization::display(grids);
    Ok(())
}

/// Prints the number of saved questions.
fn run_count(args: OutArgs) -> Result<(), Box<dyn Error>> {
    let count = persistence::count(&args.out)
        .ok_or_else(|| format!("No bank.json found in {}. Run 'streakview generate' first.", args.out.display()))?;
    println!("{count} questions");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_defaults() {
        let cli = Cli::try_parse_from(["streakview", "check"]).unwrap();
        let Some(Command::Check {
            size,
            palette,
            seed,
        }) = cli.command
        else {
            panic!("expected the check subcommand");
        };
        assert_eq!((size, seed), (3, 60));
        assert_eq!(palette, ["r", "g", "b"]);
    }

    #[test]
    fn test_generate_overrides() {
        let cli = Cli::try_parse_from([
            "streakview",
            "generate",
            "--seed",
            "9",
            "--max-attempts",
            "20",
            "--out",
            "bank-out",
        ])
        .unwrap();
        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected the generate subcommand");
        };
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.max_attempts, Some(20));
        assert_eq!(args.out.out, PathBuf::from("bank-out"));
        assert!(args.config.is_none());
    }

    #[test]
    fn test_check_runs_on_the_smallest_grid() {
        run_check(2, &["r".to_owned(), "g".to_owned()], 1).unwrap();
        assert!(run_check(1, &["r".to_owned()], 1).is_err());
    }

    #[test]
    fn test_count_without_a_bank_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_count(OutArgs {
            out: dir.path().to_path_buf(),
        });
        assert!(result.is_err());
    }
}
