//! Logging setup built on `tracing-subscriber`.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → stderr | rotating log file
//! ```
//!
//! # Configuration
//!
//! The filter is chosen by:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` config option
//! 3. Default: `"info"`
//!
//! Setting `log_file` sends output to that file, which rotates at 10MB and
//! keeps 3 backups.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - `file_writer`: rotating file writer

mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
