//! Step runners used by the CLI
//!
//! [`SystemRunner`] performs the real download or process call and echoes it;
//! [`DryRunner`] only echoes.

use crate::cli::output::{create_download_bar, print_command, print_detail, print_download};
use crate::core::plan::{Step, StepOutcome, StepRunner};
use crate::error::ProvisionError;
use crate::infra::download::{DownloadManager, ProgressCallback};
use crate::infra::process::run_command;

/// Runs steps against the real network and processes
#[derive(Debug, Default)]
pub struct SystemRunner {
    downloads: DownloadManager,
}

impl SystemRunner {
    /// Create a runner with a default download manager
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepRunner for SystemRunner {
    async fn run_step(&mut self, step: &Step) -> Result<StepOutcome, ProvisionError> {
        match step {
            Step::Download { url, dest } => {
                print_download(url);
                let bar = create_download_bar(0);
                let bar_handle = bar.clone();
                let progress: ProgressCallback = Box::new(move |downloaded, total| {
                    if total > 0 && bar_handle.length() != Some(total) {
                        bar_handle.set_length(total);
                    }
                    bar_handle.set_position(downloaded);
                });

                let result = self.downloads.download(url, dest, Some(progress)).await;
                bar.finish_and_clear();
                let result = result?;

                tracing::info!(
                    "saved {} ({} bytes, sha256 {})",
                    result.path.display(),
                    result.size,
                    result.checksum
                );
                Ok(StepOutcome::Downloaded {
                    path: result.path,
                    size: result.size,
                    sha256: result.checksum,
                })
            }
            Step::Run(cmd) => {
                print_command(&cmd.to_string());
                let code = run_command(cmd).await?;
                Ok(StepOutcome::Exited { code })
            }
        }
    }
}

/// Echoes steps without performing them
#[derive(Debug, Default)]
pub struct DryRunner;

impl StepRunner for DryRunner {
    async fn run_step(&mut self, step: &Step) -> Result<StepOutcome, ProvisionError> {
        match step {
            Step::Download { url, dest } => {
                print_download(url);
                print_detail(&format!("-> {}", dest.display()));
            }
            Step::Run(cmd) => print_command(&cmd.to_string()),
        }
        Ok(StepOutcome::Planned)
    }
}
