// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use glossalign::app_config::{self, Config};
use glossalign::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for glossalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Write the default configuration as JSON
    InitConfig {
        /// Where to write the configuration
        #[arg(value_name = "PATH", default_value = "glossalign.json")]
        path: PathBuf,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force_overwrite: bool,
    },
}

/// glossalign - Interlinear gloss realigner for Toolbox text
///
/// Re-pads the tiers of Toolbox interlinear glosses so that columns line up
/// on screen, counting combining diacritics as zero width and East Asian
/// wide characters as two.
#[derive(Parser, Debug)]
#[command(name = "glossalign")]
#[command(version)]
#[command(about = "Realign Toolbox interlinear glosses by display width")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "glossalign realigns the tiers of Toolbox interlinear text so every column starts at the same display column.

EXAMPLES:
    glossalign text.txt                         # Print the realigned text to stdout
    glossalign text.txt fixed.txt               # Write (or overwrite) fixed.txt
    glossalign corpus/                          # Write <name>.aligned.txt next to every .txt file
    glossalign -f corpus/                       # Also replace existing .aligned.txt files
    glossalign --check corpus/                  # Exit non-zero if anything would change
    glossalign -m '\\tx' -m '\\gl' text.txt      # Use a custom tier cycle
    glossalign --require-complete text.txt      # Leave records with missing tiers alone
    glossalign init-config                      # Write glossalign.json with the defaults
    glossalign completions bash > glossalign.bash

CONFIGURATION:
    Configuration is read from glossalign.json by default. You can specify a
    different file with --config-path. If the file doesn't exist, the defaults
    are used: markers \\t \\mb \\gl \\ps, a single space delimiter and one space
    between columns.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input text file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Output file, overwritten if present; stdout when omitted (files only)
    #[arg(value_name = "OUTPUT_PATH")]
    output_path: Option<PathBuf>,

    /// Replace existing <name>.aligned files in directory mode
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "glossalign.json")]
    config_path: PathBuf,

    /// Tier marker, repeat in record order (replaces configured markers)
    #[arg(short, long = "marker", value_name = "MARKER")]
    markers: Vec<String>,

    /// Text between a marker and the first field
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Minimum number of spaces between columns
    #[arg(short, long)]
    spacing: Option<usize>,

    /// Leave records that lack a configured tier unchanged
    #[arg(long)]
    require_complete: bool,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Do not write anything; fail if any input would change
    #[arg(long)]
    check: bool,

    /// Extension of the files processed in a directory
    #[arg(long, default_value = "txt")]
    extension: String,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Glyph and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "\x1B[1;31m"),
            Level::Warn => ("🚧", "\x1B[1;33m"),
            Level::Info => (" ", "\x1B[1;32m"),
            Level::Debug => ("🔍", "\x1B[1;36m"),
            Level::Trace => ("📋", "\x1B[1;35m"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (glyph, colour) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                colour, now, glyph, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    if let Err(e) = run_cli() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    // The logger accepts everything; the effective level is set through
    // log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let mut cli = CommandLineOptions::parse();

    match cli.command.take() {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "glossalign", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::InitConfig { path, force_overwrite }) => init_config(&path, force_overwrite),
        None => {
            let input_path = cli.input_path.clone().ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            run_realign(&cli, &input_path)
        }
    }
}

fn init_config(path: &Path, force_overwrite: bool) -> Result<()> {
    if path.exists() && !force_overwrite {
        return Err(anyhow!("Config file already exists: {:?} (use -f to force overwrite)", path));
    }
    Config::default().save_to_path(path)?;
    info!("Wrote default configuration to {:?}", path);
    Ok(())
}

/// Load the config file, or the defaults if it is missing, then apply CLI overrides
fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = match Config::load_from_path(&options.config_path)? {
        Some(config) => {
            debug!("Loaded configuration from {:?}", options.config_path);
            config
        }
        None => {
            debug!("Config file not found at {:?}, using defaults", options.config_path);
            Config::default()
        }
    };

    if !options.markers.is_empty() {
        config.tiers.markers = options.markers.clone();
    }
    if let Some(delimiter) = &options.delimiter {
        config.tiers.marker_delimiter = delimiter.clone();
    }
    if let Some(spacing) = options.spacing {
        config.layout.spacing = spacing;
    }
    if options.require_complete {
        config.tiers.require_complete_records = true;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn run_realign(options: &CommandLineOptions, input_path: &Path) -> Result<()> {
    // Apply a CLI log level before the config is read so loading is traced too
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    if input_path.is_dir() {
        if options.output_path.is_some() {
            return Err(anyhow!("OUTPUT_PATH cannot be used with a directory input"));
        }

        let summary = controller.run_folder(input_path, &options.extension, options.force_overwrite, options.check)?;

        if options.check {
            let changed: Vec<_> = summary.processed
                .iter()
                .filter(|run| run.report.has_changes())
                .collect();
            for run in &changed {
                warn!("{:?} is not aligned", run.input);
            }
            if !changed.is_empty() {
                return Err(anyhow!("{} file(s) would be realigned", changed.len()));
            }
        }

        if summary.has_failures() {
            return Err(anyhow!("{} file(s) failed to process", summary.failed.len()));
        }
        return Ok(());
    }

    if !input_path.is_file() {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    if options.check {
        let run = controller.check(input_path)?;
        if run.report.has_changes() {
            return Err(anyhow!("{:?} would be realigned", input_path));
        }
        info!("{:?} is already aligned", input_path);
        return Ok(());
    }

    match &options.output_path {
        Some(output_path) => {
            controller.run_to_file(input_path, output_path)?;
            info!("Wrote {:?}", output_path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            controller.run_to_writer(input_path, &mut handle)?;
        }
    }

    Ok(())
}
