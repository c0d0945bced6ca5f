//! Spotify Listening Stats Library
//!
//! This library authenticates against the Spotify Web API, collects a small
//! set of listening statistics (the most played track of the last weeks and
//! the dominant genre over the long-term and recent windows) and renders them
//! into a static file. It is meant to be run periodically as a batch job.
//!
//! # Modules
//!
//! - `cli` - The update run wiring all other modules together
//! - `config` - Environment loading and the per-run `Settings`
//! - `management` - On-disk credential cache
//! - `render` - Formatting and writing the output document
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use spotstats::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> spotstats::Res<()> {
//!     config::load_env().await?;
//!     let settings = config::Settings::from_env();
//!     cli::update(&settings).await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod management;
pub mod render;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Requesting a new access token...");
/// info!("Looking up genres for {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Wrote {}", path.display());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only the
/// binary uses it; library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Update failed: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every recoverable failure of a run: unreadable credential cache,
/// failed token exchange, failed read call or artist lookup.
///
/// # Example
///
/// ```
/// warning!("Cannot read credential cache, starting empty. Err: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
