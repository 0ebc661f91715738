/*!
 * # glossalign - Interlinear gloss realigner for Toolbox text
 *
 * A Rust library that repairs column alignment in interlinear glosses
 * exported from the fieldwork software Toolbox.
 *
 * ## Features
 *
 * - Measure words by display width: combining diacritics take no column,
 *   East Asian wide characters take two
 * - Detect records from a configurable cycle of tier markers
 * - Preserve every non-tier line verbatim
 * - Width overrides for Private Use Area fonts
 * - Single files or whole directories from the command line
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `gloss`: The realignment engine:
 *   - `gloss::width`: Display width of codepoints
 *   - `gloss::tokenizer`: Tier line tokenizer
 *   - `gloss::columns`: Column width model
 *   - `gloss::realigner`: Tier rendering
 *   - `gloss::scanner`: Record detection
 *   - `gloss::report`: Per-run counts
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod gloss;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use gloss::{realign, realign_with_report, RealignReport};
pub use errors::{AppError, ConfigError, RealignError};
