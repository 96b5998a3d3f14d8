//! YAML Export functionality
//!
//! Exports one user's data to YAML for human-readable backup.

use std::io::Write;

use crate::config::user::CurrentUser;
use crate::error::{StockroomError, StockroomResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the user's data to YAML
pub fn export_full_yaml<W: Write>(
    storage: &Storage,
    user: &CurrentUser,
    writer: &mut W,
) -> StockroomResult<()> {
    let export = FullExport::from_storage(storage, user)?;

    let header = format!(
        "# Stockroom Export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| StockroomError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| StockroomError::Export(e.to_string()))?;

    Ok(())
}
