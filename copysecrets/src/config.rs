//! Configuration management
//!
//! Required parameters may come from a config file, `COPYSECRETS_*`
//! environment variables or flags, with flags taking precedence.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File};
use copysecrets_core::{ConfigurationError, CopyConfig, RawConfig};

use crate::cli::Args;

/// Resolve and validate the copy configuration
pub fn resolve(args: &Args) -> Result<CopyConfig, ConfigurationError> {
    let file = match &args.config {
        Some(path) => File::from(path.as_path()).required(true),
        None => File::with_name("copysecrets").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(Environment::with_prefix("COPYSECRETS"));

    layer_flags(builder, args)
}

/// Apply flags on top of `builder` and validate the result
fn layer_flags(
    builder: ConfigBuilder<DefaultState>,
    args: &Args,
) -> Result<CopyConfig, ConfigurationError> {
    let raw = builder
        .set_override_option("original", args.original.clone())
        .and_then(|b| b.set_override_option("new", args.new.clone()))
        .and_then(|b| b.set_override_option("region", args.region.clone()))
        .and_then(|b| b.set_override_option("endpoint_url", args.endpoint_url.clone()))
        .and_then(|b| b.build())
        .and_then(|c| c.try_deserialize::<RawConfig>())
        .map_err(source_error)?;

    raw.validate()
}

fn source_error(err: ConfigError) -> ConfigurationError {
    ConfigurationError::Source(err.to_string())
}
