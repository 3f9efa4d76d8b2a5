//! Loading item payloads.

use grc_common::{DisplayMode, GrcItems, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read a JSON array of items from a file, or from stdin when the path is
/// absent or `-`.
pub fn read_items(source: Option<&Path>, mode: DisplayMode) -> Result<GrcItems> {
    let json = match source {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let items = GrcItems::from_json(mode, &json)?;
    debug!(mode = %mode, items = items.len(), "items loaded");
    Ok(items)
}
