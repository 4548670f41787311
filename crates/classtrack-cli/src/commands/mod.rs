pub mod config;
pub mod layout;
pub mod now;

use std::path::{Path, PathBuf};

use classtrack_core::{Config, Directory, Timetable};

/// Read a snapshot file and build the timetable, using `directory` or the
/// configured directory file for secondary labels.
pub fn load_timetable(
    snapshot: &Path,
    directory: Option<&PathBuf>,
    config: &Config,
) -> Result<Timetable, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(snapshot)
        .map_err(|e| format!("cannot read {}: {e}", snapshot.display()))?;
    let directory = match directory.or(config.directory.as_ref()) {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            serde_json::from_str::<Directory>(&content)?
        }
        None => Directory::default(),
    };

    let timetable = Timetable::from_json(&content, &directory)?;
    for rejected in &timetable.rejected {
        eprintln!("skipped entry {}: {}", rejected.index, rejected.error);
    }
    Ok(timetable)
}
