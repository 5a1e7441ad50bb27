//! hdf5-ci - CI provisioning helper
//!
//! Entry point for the hdf5-ci command-line application.

use clap::Parser;

use hdf5_ci::cli::output::{display_error, OutputConfig};
use hdf5_ci::cli::Cli;
use hdf5_ci::error::ProvisionError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Apply output configuration globally
    let output_config = OutputConfig::new(cli.quiet, cli.verbose);
    output_config.apply_global();

    // Initialize tracing subscriber; RUST_LOG directives take precedence
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(output_config.log_level().into())
                .from_env_lossy(),
        )
        .init();

    // Run the action and propagate failures as the exit code
    if let Err(e) = cli.run().await {
        display_error(&e);
        let code = e
            .downcast_ref::<ProvisionError>()
            .map_or(1, ProvisionError::exit_code);
        std::process::exit(code);
    }
}
