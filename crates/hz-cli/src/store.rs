//! Roster persistence: one JSON file per table.

use std::fs;
use std::path::Path;

use hz_core::Roster;

/// Load the roster at `path`. A missing file is an empty roster.
pub fn load(path: &Path) -> Result<Roster, String> {
    if !path.exists() {
        return Ok(Roster::new());
    }
    let json = fs::read_to_string(path)
        .map_err(|e| format!("failed to read roster {}: {e}", path.display()))?;
    Roster::from_json(&json).map_err(|e| format!("failed to parse roster {}: {e}", path.display()))
}

/// Write the roster to `path`, creating parent directories as needed.
pub fn save(path: &Path, roster: &Roster) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
    }
    let json = roster.to_json().map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("failed to write roster {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), characters = roster.len(), "roster saved");
    Ok(())
}
