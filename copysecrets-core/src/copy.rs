//! Copy orchestration: fetch the source secret, then create the destination

use std::io::Write;

use tracing::{debug, info, warn};

use crate::config::CopyConfig;
use crate::error::CopyError;
use crate::store::{SecretStore, StoreAck};

/// Copy the value of `config.source_name()` into a new secret named
/// `config.destination_name()`.
///
/// Progress lines are written to `out`. The destination is only created once
/// the source has been read successfully; any failure before that ends the
/// run. Failing to write the final line after a successful create is logged.
pub async fn copy_secret<S, W>(
    config: &CopyConfig,
    store: &S,
    out: &mut W,
) -> Result<StoreAck, CopyError>
where
    S: SecretStore + ?Sized,
    W: Write,
{
    let source = config.source_name();
    let destination = config.destination_name();

    writeln!(
        out,
        "secret {} to be copied in region {}",
        source,
        config.region()
    )?;

    debug!(secret = %source, region = %store.region(), "Fetching source secret");
    let value = store.fetch(source).await?;

    writeln!(out, "secret value of {} is {}", source, value)?;

    debug!(secret = %destination, region = %store.region(), "Creating destination secret");
    let ack = store.store(destination, &value).await?;

    info!(
        source = %source,
        destination = %destination,
        arn = ack.arn.as_deref().unwrap_or("-"),
        "Secret copied"
    );
    // The destination exists now; a lost status line does not undo that
    if let Err(e) = writeln!(
        out,
        "successfully copied secret with name {} to {}",
        source, destination
    ) {
        warn!(error = %e, "Failed to write success line");
    }

    Ok(ack)
}
