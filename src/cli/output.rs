//! Output formatting and progress indicators
//!
//! User-facing trace of what the provisioner does: the action banner, each
//! download, and each command echoed as `> program args` before it runs.
//! Diagnostics go through `tracing` instead.

use std::sync::atomic::{AtomicBool, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Output settings chosen on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress everything except errors
    pub quiet: bool,
    /// Verbosity level (number of `-v` flags)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create output configuration
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Make this configuration visible to the output helpers
    pub fn apply_global(self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
    }

    /// Default `tracing` level for this verbosity
    pub fn log_level(self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// Whether quiet mode is active
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print an informational line
pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{message}");
    }
}

/// Print a success line
pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {message}", status::SUCCESS);
    }
}

/// Print an indented detail line
pub fn print_detail(message: &str) {
    if !is_quiet() {
        println!("    {message}");
    }
}

/// Echo a command before it runs
pub fn print_command(command: &str) {
    if !is_quiet() {
        println!("\n> {command}");
    }
}

/// Announce a download
pub fn print_download(url: &str) {
    if !is_quiet() {
        println!("\nDownloading: {url}");
    }
}

/// Print an error with its cause chain to stderr (always shown)
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("    caused by: {cause}");
    }
}

/// Create a progress bar for downloads
pub fn create_download_bar(total: u64) -> ProgressBar {
    if is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
    );
    pb
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}
