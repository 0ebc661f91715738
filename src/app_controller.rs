use log::{error, warn, info, debug};
use std::io::Write;
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, ALIGNED_INFIX};
use crate::gloss::{self, RealignReport};

// @module: Application controller for gloss realignment

/// What happened to a single input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Realigned output was written
    Written,
    /// Output already existed and overwriting was not forced
    SkippedExisting,
    /// Nothing was written (check mode or stdout)
    NotWritten,
}

/// Result of processing one input file
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub status: RunStatus,
    pub report: RealignReport,
}

/// Result of processing a directory
#[derive(Debug, Default)]
pub struct FolderSummary {
    pub processed: Vec<RunSummary>,
    pub failed: Vec<(PathBuf, String)>,
}

impl FolderSummary {
    pub fn skipped_count(&self) -> usize {
        self.processed
            .iter()
            .filter(|s| s.status == RunStatus::SkippedExisting)
            .count()
    }

    pub fn written_count(&self) -> usize {
        self.processed
            .iter()
            .filter(|s| s.status == RunStatus::Written)
            .count()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Main application controller for gloss realignment
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Realign in-memory text
    pub fn realign_text(&self, text: &str) -> Result<(String, RealignReport), AppError> {
        Ok(gloss::realign_with_report(text, &self.config)?)
    }

    /// Read and realign a file without writing anything
    pub fn realign_file(&self, input_file: &Path) -> Result<(String, RealignReport), AppError> {
        let content = FileManager::read_to_string(input_file).map_err(file_error)?;
        self.realign_text(&content)
    }

    /// Realign `input_file` and write the result to `output_file`.
    ///
    /// An existing output is left alone unless `force_overwrite` is set.
    pub fn run(&self, input_file: &Path, output_file: &Path, force_overwrite: bool) -> Result<RunSummary, AppError> {
        if !input_file.exists() {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_file)));
        }

        if output_file.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", output_file);
            return Ok(RunSummary {
                input: input_file.to_path_buf(),
                output: Some(output_file.to_path_buf()),
                status: RunStatus::SkippedExisting,
                report: RealignReport::default(),
            });
        }

        let (realigned, report) = self.realign_file(input_file)?;
        Self::log_report(input_file, &report);

        FileManager::write_to_file(output_file, &realigned).map_err(file_error)?;
        debug!("Wrote {:?}", output_file);

        Ok(RunSummary {
            input: input_file.to_path_buf(),
            output: Some(output_file.to_path_buf()),
            status: RunStatus::Written,
            report,
        })
    }

    /// Realign `input_file` into an explicitly named `output_file`,
    /// replacing it if it exists
    pub fn run_to_file(&self, input_file: &Path, output_file: &Path) -> Result<RunSummary, AppError> {
        self.run(input_file, output_file, true)
    }

    /// Realign `input_file` and write the result to `writer`, e.g. stdout
    pub fn run_to_writer<W: Write>(&self, input_file: &Path, writer: &mut W) -> Result<RunSummary, AppError> {
        let (realigned, report) = self.realign_file(input_file)?;
        Self::log_report(input_file, &report);

        writer.write_all(realigned.as_bytes())?;
        writer.flush()?;

        Ok(RunSummary {
            input: input_file.to_path_buf(),
            output: None,
            status: RunStatus::NotWritten,
            report,
        })
    }

    /// Realign without writing; the report tells whether anything would change
    pub fn check(&self, input_file: &Path) -> Result<RunSummary, AppError> {
        let (_, report) = self.realign_file(input_file)?;
        if report.has_changes() {
            info!("{:?} would change: {} tier line(s)", input_file, report.lines_changed);
        } else {
            debug!("{:?} is already aligned", input_file);
        }
        Ok(RunSummary {
            input: input_file.to_path_buf(),
            output: None,
            status: RunStatus::NotWritten,
            report,
        })
    }

    /// Run the workflow in folder mode, realigning every file with the given
    /// extension. Outputs go next to their inputs as `<stem>.aligned.<ext>`.
    /// A file that fails is logged and does not stop the others.
    pub fn run_folder(&self, input_dir: &Path, extension: &str, force_overwrite: bool, check_only: bool) -> Result<FolderSummary, AppError> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)));
        }

        let files: Vec<PathBuf> = FileManager::find_files(input_dir, extension)
            .map_err(file_error)?
            .into_iter()
            .filter(|f| !FileManager::is_generated_output(f, ALIGNED_INFIX))
            .collect();

        if files.is_empty() {
            warn!("No .{} files found in directory: {:?}", extension, input_dir);
            return Ok(FolderSummary::default());
        }

        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));

        let mut summary = FolderSummary::default();

        for file in &files {
            let file_name = file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(file_name.clone());

            let result = if check_only {
                self.check(file)
            } else {
                let output_path = FileManager::generate_output_path(file, ALIGNED_INFIX);
                self.run(file, &output_path, force_overwrite)
            };

            match result {
                Ok(run) => summary.processed.push(run),
                Err(e) => {
                    folder_pb.suspend(|| error!("Error processing file {}: {}", file_name, e));
                    summary.failed.push((file.clone(), e.to_string()));
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        info!(
            "Folder processing completed in {}: {} written, {} skipped, {} errors",
            Self::format_duration(start_time.elapsed()),
            summary.written_count(),
            summary.skipped_count(),
            summary.failed.len()
        );

        Ok(summary)
    }

    fn log_report(input_file: &Path, report: &RealignReport) {
        info!("{:?}: {}", input_file, report);
        for incomplete in &report.incomplete {
            warn!("Could not realign {}", incomplete);
        }
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}

fn file_error(error: anyhow::Error) -> AppError {
    AppError::File(format!("{:#}", error))
}
