//! Command-line flags

use clap::error::ErrorKind;
use clap::Parser;
use copysecrets_core::ConfigurationError;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "copysecrets", version)]
#[command(about = "Copy an AWS Secrets Manager secret to a new name", long_about = None)]
pub struct Args {
    /// Friendly name of the old secret
    #[arg(long, allow_hyphen_values = true)]
    pub original: Option<String>,

    /// Friendly name of the new secret
    #[arg(long, allow_hyphen_values = true)]
    pub new: Option<String>,

    /// AWS region
    #[arg(long, allow_hyphen_values = true)]
    pub region: Option<String>,

    /// Secrets Manager endpoint override (e.g. a local emulator)
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Configuration file layered under environment and flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "COPYSECRETS_LOG_LEVEL")]
    pub log_level: String,
}

/// Flags that consume the following token when written without `=`
const VALUE_FLAGS: &[&str] = &[
    "original",
    "new",
    "region",
    "endpoint-url",
    "config",
    "log-level",
];

/// Parse flags, accepting both `-original x` and `--original x`
pub fn parse<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Args::try_parse_from(normalize_args(args))
}

/// Turn a clap parse failure into a configuration error.
///
/// clap reports flags as it saw them after [`normalize_args`], so an unknown
/// `-source` is reported as `--source`; the message says so.
pub fn invocation_error(err: &clap::Error) -> ConfigurationError {
    let rendered = err.to_string();
    let mut message = rendered
        .trim_start_matches("error: ")
        .trim_end()
        .to_string();
    if err.kind() == ErrorKind::UnknownArgument {
        message.push_str("\n(single-dash flags such as -name are reported as --name)");
    }
    ConfigurationError::Invocation(message)
}

/// Rewrite single-dash long flags (`-region`) to the double-dash form clap expects.
///
/// Single-character flags (`-h`, `-V`) are left alone, and the value following
/// a value-taking flag is never rewritten even if it starts with `-`. Parse
/// errors therefore name the double-dash spelling.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut expect_value = false;
    let mut passthrough = false;

    for arg in args {
        if passthrough || expect_value {
            expect_value = false;
            normalized.push(arg);
            continue;
        }

        let rewritten = arg.to_str().and_then(|text| {
            if text == "--" {
                passthrough = true;
                return None;
            }
            let name = match text.strip_prefix("--") {
                Some(name) => name,
                None => text.strip_prefix('-').filter(|name| name.chars().count() > 1)?,
            };
            expect_value = !name.contains('=') && VALUE_FLAGS.contains(&name);
            Some(format!("--{name}"))
        });

        normalized.push(rewritten.map_or(arg, OsString::from));
    }

    normalized
}
