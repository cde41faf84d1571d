//! enchanted-moods CLI
//!
//! Pick an emotion, meet its creature, collect its quotes.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use enchanted_moods::catalog::{resolve_catalog, Catalog};
use enchanted_moods::chime::{
    check_sample_rate, write_wav, Chime, DEFAULT_SAMPLE_RATE, MAX_SAMPLE_RATE, MIN_SAMPLE_RATE,
};
use enchanted_moods::quotes::QuoteManager;
use enchanted_moods::report::{format_catalog, format_chime_written, format_draw};
use enchanted_moods::tui;
use enchanted_moods::types::{DrawReport, OutputFormat, SessionConfig};

/// Upper bound for `draw -n`.
const MAX_DRAW_COUNT: u64 = 10_000;

#[derive(Parser)]
#[command(name = "enchanted-moods")]
#[command(about = "Pick an emotion, meet its creature, collect its quotes")]
#[command(version)]
struct Cli {
    /// Catalog JSON file (default: config dir, then built-in)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive sanctuary (default)
    Tui(TuiArgs),

    /// List the available moods
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Draw successive quotes for a mood
    Draw {
        /// Mood key, e.g. "calm"
        mood: String,

        /// Number of quotes (default: one full cycle)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..=MAX_DRAW_COUNT))]
        count: Option<u64>,

        /// Seed for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Render the interaction chime to a WAV file
    Chime {
        /// Output file
        #[arg(long)]
        out: PathBuf,

        /// Samples per second
        #[arg(
            long,
            default_value_t = DEFAULT_SAMPLE_RATE,
            value_parser = clap::value_parser!(u32).range(MIN_SAMPLE_RATE as i64..=MAX_SAMPLE_RATE as i64)
        )]
        sample_rate: u32,
    },
}

#[derive(Args, Default)]
struct TuiArgs {
    /// Mood preselected in the picker
    #[arg(long)]
    mood: Option<String>,

    /// Don't ring the terminal bell
    #[arg(long)]
    mute: bool,

    /// Seed for a reproducible quote sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here while the TUI owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_else(|| Commands::Tui(TuiArgs::default()));

    let result = match command {
        Commands::Tui(args) => cmd_tui(cli.catalog.as_deref(), cli.verbose, args),
        Commands::List { format } => {
            init_tracing(cli.verbose);
            cmd_list(cli.catalog.as_deref(), format.into())
        }
        Commands::Draw { mood, count, seed, format } => {
            init_tracing(cli.verbose);
            cmd_draw(cli.catalog.as_deref(), &mood, count, seed, format.into())
        }
        Commands::Chime { out, sample_rate } => {
            init_tracing(cli.verbose);
            cmd_chime(&out, sample_rate)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

fn env_filter(verbose: bool) -> tracing_subscriber::EnvFilter {
    use tracing_subscriber::EnvFilter;

    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Logging while the TUI owns the terminal: to a file, or not at all.
fn init_file_tracing(verbose: bool, path: &Path) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ============================================================================
// HELPERS
// ============================================================================

fn load_catalog(path: Option<&Path>) -> Result<Catalog, String> {
    resolve_catalog(path).map_err(|e| e.to_string())
}

fn unknown_mood(mood: &str, catalog: &Catalog) -> String {
    let available: Vec<&str> = catalog.keys().collect();
    format!(
        "Unknown mood '{}'.\nAvailable: {}",
        mood,
        available.join(", ")
    )
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_tui(catalog_path: Option<&Path>, verbose: bool, args: TuiArgs) -> Result<(), String> {
    if let Some(log_file) = &args.log_file {
        init_file_tracing(verbose, log_file)?;
    }

    let catalog = load_catalog(catalog_path)?;

    if let Some(mood) = &args.mood {
        if catalog.get(mood).is_none() {
            return Err(unknown_mood(mood, &catalog));
        }
    }

    let config = SessionConfig {
        initial_category: args.mood,
        mute: args.mute,
        seed: args.seed,
        ..Default::default()
    };

    tui::run(catalog, &config).map_err(|e| format!("terminal error: {}", e))
}

fn cmd_list(catalog_path: Option<&Path>, format: OutputFormat) -> Result<(), String> {
    let catalog = load_catalog(catalog_path)?;
    print!("{}", format_catalog(&catalog, format));
    Ok(())
}

fn cmd_draw(
    catalog_path: Option<&Path>,
    mood: &str,
    count: Option<u64>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<(), String> {
    let catalog = load_catalog(catalog_path)?;
    let Some(category) = catalog.get(mood) else {
        return Err(unknown_mood(mood, &catalog));
    };
    let count = match count {
        Some(n) => usize::try_from(n).map_err(|_| format!("count {} is too large", n))?,
        None => category.variants.len().max(1),
    };

    let mut quotes = match seed {
        Some(seed) => QuoteManager::seeded(&catalog, seed),
        None => QuoteManager::new(&catalog),
    };

    let report = DrawReport {
        category: mood.to_string(),
        seed,
        quotes: (0..count).map(|_| quotes.next(mood)).collect(),
    };

    print!("{}", format_draw(&report, format));
    Ok(())
}

fn cmd_chime(out: &Path, sample_rate: u32) -> Result<(), String> {
    check_sample_rate(sample_rate).map_err(|e| e.to_string())?;

    let chime = Chime::default();
    let samples = chime.render(sample_rate);
    let bytes = write_wav(out, &samples, sample_rate).map_err(|e| e.to_string())?;

    let length = Duration::from_secs_f32(chime.stop_secs);
    print!("{}", format_chime_written(out, bytes, length, sample_rate));
    Ok(())
}
