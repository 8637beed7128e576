//! copysecrets - copy an AWS Secrets Manager secret to a new name
//!
//! Reads the value of `-original` and creates `-new` with it, in `-region`.
//! Exits 0 on success and 1 on any configuration, read or create failure.

mod cli;
mod config;

use clap::error::ErrorKind;
use std::io;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use copysecrets_aws::AwsSecretStore;
use copysecrets_core::{copy_secret, ConfigurationError, CopyConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    println!("Copying secrets");

    let args = match cli::parse(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return configuration_failure(&cli::invocation_error(&e)),
    };

    // Logs go to stderr so stdout carries only the status lines
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "copysecrets={0},copysecrets_core={0},copysecrets_aws={0}",
                    args.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match config::resolve(&args) {
        Ok(config) => config,
        Err(e) => return configuration_failure(&e),
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(config: CopyConfig) -> anyhow::Result<()> {
    debug!(
        region = %config.region(),
        endpoint = config.endpoint_url().unwrap_or("default"),
        "Connecting to Secrets Manager"
    );
    let store = AwsSecretStore::connect(&config).await;

    copy_secret(&config, &store, &mut io::stdout()).await?;
    Ok(())
}

fn configuration_failure(err: &ConfigurationError) -> ExitCode {
    println!("error while parsing flags: {}", err);
    ExitCode::from(1)
}
