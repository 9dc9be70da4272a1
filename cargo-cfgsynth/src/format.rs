//! Best-effort `rustfmt` pass over generated files.

use std::process::Command;

use camino::Utf8Path;
use tracing::{debug, warn};

/// Formats `path` in place. A missing or failing `rustfmt` leaves the file
/// as emitted, which still compiles.
pub fn rustfmt(path: &Utf8Path) {
    match Command::new("rustfmt").arg("--edition=2024").arg(path).status() {
        Ok(status) if status.success() => debug!(%path, "formatted generated file"),
        Ok(status) => warn!(%path, %status, "rustfmt rejected the generated file; left unformatted"),
        Err(err) => debug!(%path, error = %err, "rustfmt unavailable; generated file left unformatted"),
    }
}
