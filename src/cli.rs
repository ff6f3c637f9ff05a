//! The command line interface for the ADORB cost calculator.
use crate::adorb::{calculate_variant_adorb_costs, calculate_variant_adorb_results};
use crate::log;
use crate::output::{DataWriter, create_output_directory, get_output_dir};
use crate::settings::Settings;
use crate::variant::Variant;
use ::log::{info, warn};
use anyhow::{Context, Result, ensure};
use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};

pub mod example;
use example::ExampleSubcommands;
pub mod settings;
use settings::SettingsSubcommands;

/// The command line interface for the ADORB cost calculator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Option<Commands>,
    /// Flag to provide the CLI docs as markdown
    #[arg(long, hide = true)]
    markdown_help: bool,
}

/// Options for the run command
#[derive(Args, Default)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
    /// Whether to write the intermediate cost streams to CSV files
    #[arg(long)]
    pub debug_model: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Calculate the ADORB costs of a building variant.
    Run {
        /// Path to the variant directory.
        variant_dir: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Manage example variants.
    Example {
        /// The available subcommands for managing example variants.
        #[command(subcommand)]
        subcommand: ExampleSubcommands,
    },
    /// Validate a building variant.
    Validate {
        /// The path to the variant directory.
        variant_dir: PathBuf,
    },
    /// Compare the total ADORB costs of several building variants.
    Compare {
        /// Paths to the variant directories.
        #[arg(required = true, num_args = 1..)]
        variant_dirs: Vec<PathBuf>,
    },
    /// Manage settings file.
    Settings {
        /// The subcommands for managing the settings file.
        #[command(subcommand)]
        subcommand: SettingsSubcommands,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Run { variant_dir, opts } => handle_run_command(&variant_dir, &opts, None),
            Self::Example { subcommand } => subcommand.execute(),
            Self::Validate { variant_dir } => handle_validate_command(&variant_dir, None),
            Self::Compare { variant_dirs } => {
                handle_compare_command(&variant_dirs, None).map(|_| ())
            }
            Self::Settings { subcommand } => subcommand.execute(),
        }
    }
}

/// Parse CLI arguments and start the program
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    // Invoked as: `$ adorb --markdown-help`
    if cli.markdown_help {
        clap_markdown::print_help_markdown::<Cli>();
        return Ok(());
    }

    let Some(command) = cli.command else {
        // Output program help in markdown format
        let help_str = Cli::command().render_long_help().to_string();
        println!("{help_str}");
        return Ok(());
    };

    command.execute()
}

/// Load program settings, if not provided
fn load_settings(settings: Option<Settings>) -> Result<Settings> {
    match settings {
        Some(settings) => Ok(settings),
        None => Settings::load().context("Failed to load settings."),
    }
}

/// Handle the `run` command.
pub fn handle_run_command(
    variant_path: &Path,
    opts: &RunOpts,
    settings: Option<Settings>,
) -> Result<()> {
    let mut settings = load_settings(settings)?;

    // These settings can be overridden by command-line arguments
    if opts.debug_model {
        settings.debug_model = true;
    }
    if opts.overwrite {
        settings.overwrite = true;
    }

    // Get path to output folder
    let pathbuf: PathBuf;
    let output_path = if let Some(p) = opts.output_dir.as_deref() {
        p
    } else {
        pathbuf = get_output_dir(&settings.results_dir, variant_path)?;
        &pathbuf
    };

    let overwrite =
        create_output_directory(output_path, settings.overwrite).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                output_path.display()
            )
        })?;

    // Initialise program logger
    log::init(Some(&settings.log_level), Some(output_path))
        .context("Failed to initialise logging.")?;

    // Load the variant to run
    let variant = Variant::from_path(variant_path).context("Failed to load variant.")?;
    info!(
        "Loaded variant '{}' from {}",
        variant.name(),
        variant_path.display()
    );
    info!("Output folder: {}", output_path.display());

    // NB: We have to wait until the logger is initialised to display this warning
    if overwrite {
        warn!("Results of a previous run in the output folder have been removed");
    }

    // Run the calculation
    let results = calculate_variant_adorb_results(&variant);
    let mut writer = DataWriter::create(output_path, &variant, settings.debug_model)?;
    writer.write_results(&results, &variant.grid_region)?;
    writer.flush()?;
    info!(
        "ADORB cost over {} years: ${:.2}",
        variant.analysis_duration(),
        results.table.total().value()
    );
    info!("Calculation complete!");

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(variant_path: &Path, settings: Option<Settings>) -> Result<()> {
    let settings = load_settings(settings)?;

    // Initialise program logger (we won't save log files when running the validate command)
    log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")?;

    // Load/validate the variant
    Variant::from_path(variant_path).context("Failed to validate variant.")?;
    info!("Variant validation successful!");

    Ok(())
}

/// Handle the `compare` command.
///
/// # Returns
///
/// The name and total ADORB cost of each variant, ordered from cheapest to most expensive.
pub fn handle_compare_command(
    variant_paths: &[PathBuf],
    settings: Option<Settings>,
) -> Result<Vec<(String, f64)>> {
    ensure!(!variant_paths.is_empty(), "No variants to compare");
    let settings = load_settings(settings)?;

    // Initialise program logger (no log files are saved when comparing)
    log::init(Some(&settings.log_level), None).context("Failed to initialise logging.")?;

    let mut totals = Vec::with_capacity(variant_paths.len());
    for variant_path in variant_paths {
        let variant = Variant::from_path(variant_path).with_context(|| {
            format!("Failed to load variant from {}", variant_path.display())
        })?;
        let total = calculate_variant_adorb_costs(&variant).total();
        info!("Variant '{}': ${:.2}", variant.name(), total.value());
        totals.push((variant.name().to_string(), total.value()));
    }

    totals.sort_by(|(_, a), (_, b)| a.total_cmp(b));
    for (rank, (name, total)) in totals.iter().enumerate() {
        println!("{}. {name}: ${total:.2}", rank + 1);
    }

    Ok(totals)
}
