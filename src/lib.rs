//! Spotify Playlist Song Data Library
//!
//! This library exports the tracks of a Spotify playlist, together with their
//! audio features, to a CSV table and downloads each track's cover image.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error type shared by all operations
//! - `management` - Image storage and CSV song table persistence
//! - `pipeline` - The export run: token, playlist, images, features, table
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use songdata::{config, pipeline};
//!
//! #[tokio::main]
//! async fn main() -> songdata::Res<()> {
//!     config::load_env();
//!     let config = config::Config::from_env()?;
//!     let request = pipeline::ExportRequest::new("1C8RuvGfRsX1fmxaehox9K");
//!     let summary = pipeline::run(&config, &request).await?;
//!     println!("{} rows", summary.rows);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports through [`Error`], so the
/// CLI can tell the recoverable invalid-playlist condition apart from fatal
/// authentication and I/O failures.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", playlist_id);
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
/// success!("Wrote {} rows", count);
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
/// Terminates with exit code 1. Only the binary and the CLI layer call this;
/// library code returns [`Res`] instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here
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
/// Used for per-track problems that do not stop the export, such as a cover
/// image that could not be downloaded.
///
/// # Example
///
/// ```
/// warning!("Skipped cover image for {}", track_id);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
