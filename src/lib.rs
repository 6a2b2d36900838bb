//! Artist Collection Playlist CLI Library
//!
//! This library provides functionality for building a Spotify playlist out of
//! every saved track by a single artist. It includes modules for the implicit
//! grant login flow, the persisted session, Spotify Web API communication and
//! the command-line layer that ties them together.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth redirect server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types shared across the crate
//! - `management` - Session lifecycle and durable key-value storage
//! - `server` - Local HTTP server receiving the OAuth redirect
//! - `spotify` - Spotify Web API client and the playlist workflow
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use coleccion::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> coleccion::Res<()> {
//!     config::load_env().await?;
//!     cli::status().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for application-level plumbing
/// using a boxed dynamic error trait object. Domain operations return the
/// concrete errors from [`error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Opening browser for Spotify login...");
/// info!("Scanned {} saved tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 after printing. Only the CLI layer
/// uses this macro; library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
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
/// Used for non-fatal outcomes the user should notice, such as a search
/// without results or an artist missing from the library.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
