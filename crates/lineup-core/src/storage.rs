use crate::error::{LineupError, Result};

// ---------------------------------------------------------------------------
// Filenames
// ---------------------------------------------------------------------------

const FILE_PREFIX: &str = "lineup_";
const PRESET_PREFIX: &str = "lineup_preset_";

/// Maps that ship with a premade annotation set.
const PRESET_MAPS: &[&str] = &[
    "de_dust2",
    "de_ancient",
    "de_inferno",
    "de_mirage",
    "de_anubis",
    "de_nuke",
    "de_overpass",
];

/// Default annotation filename for a map: the `de_` prefix is rewritten to
/// `lineup_`; maps without it get `lineup_` prepended.
pub fn default_filename(map: &str) -> String {
    match map.strip_prefix("de_") {
        Some(rest) => format!("{FILE_PREFIX}{rest}"),
        None => format!("{FILE_PREFIX}{map}"),
    }
}

pub fn preset_filename(map: &str) -> Result<String> {
    if !PRESET_MAPS.contains(&map) {
        return Err(LineupError::NoPreset(map.to_string()));
    }
    let rest = map.strip_prefix("de_").unwrap_or(map);
    Ok(format!("{PRESET_PREFIX}{rest}"))
}

/// Filename rules for host-side persistence: no spaces, no extension (the
/// host adds `.txt`), and preset files may be loaded but never overwritten.
pub fn validate_filename(filename: &str, saving: bool) -> Result<()> {
    if filename.contains(' ') {
        return Err(LineupError::InvalidFilename(
            "filename cannot contain spaces".to_string(),
        ));
    }
    if filename.contains('.') {
        return Err(LineupError::InvalidFilename(
            "filename should not contain an extension; .txt is added automatically".to_string(),
        ));
    }
    if saving && filename.starts_with(PRESET_PREFIX) {
        return Err(LineupError::InvalidFilename(
            "preset annotation files cannot be overwritten; choose a different name".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// StorageState
// ---------------------------------------------------------------------------

/// Bookkeeping for host-side annotation persistence: which file is loaded
/// and whether edits since the last save would be lost.
#[derive(Debug)]
pub struct StorageState {
    pub current_file: String,
    pub unsaved_changes: bool,
}

impl StorageState {
    pub fn new(map: &str) -> Self {
        Self {
            current_file: default_filename(map),
            unsaved_changes: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.unsaved_changes = true;
    }

    /// After a successful host save or load of `filename`.
    pub fn mark_clean(&mut self, filename: &str) {
        self.current_file = filename.to_string();
        self.unsaved_changes = false;
    }

    pub fn ensure_saved(&self) -> Result<()> {
        if self.unsaved_changes {
            return Err(LineupError::UnsavedChanges);
        }
        Ok(())
    }

    /// Display form: adds the extension and marks the map's default file.
    pub fn formatted(&self, filename: &str, map: &str) -> String {
        if filename == default_filename(map) {
            format!("{filename}.txt (default file)")
        } else {
            format!("{filename}.txt")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filename_rewrites_de_prefix() {
        assert_eq!(default_filename("de_nuke"), "lineup_nuke");
        assert_eq!(default_filename("cs_office"), "lineup_cs_office");
    }

    #[test]
    fn preset_filename_for_supported_maps_only() {
        assert_eq!(preset_filename("de_mirage").unwrap(), "lineup_preset_mirage");
        assert!(matches!(
            preset_filename("cs_office"),
            Err(LineupError::NoPreset(_))
        ));
    }

    #[test]
    fn filenames_with_spaces_or_dots_are_rejected() {
        assert!(validate_filename("my nades", false).is_err());
        assert!(validate_filename("nades.txt", false).is_err());
        assert!(validate_filename("my_nades", false).is_ok());
    }

    #[test]
    fn preset_files_load_but_never_save() {
        assert!(validate_filename("lineup_preset_nuke", false).is_ok());
        assert!(validate_filename("lineup_preset_nuke", true).is_err());
    }

    #[test]
    fn clean_dirty_transitions() {
        let mut storage = StorageState::new("de_dust2");
        assert_eq!(storage.current_file, "lineup_dust2");
        assert!(storage.ensure_saved().is_ok());

        storage.mark_dirty();
        assert!(matches!(
            storage.ensure_saved(),
            Err(LineupError::UnsavedChanges)
        ));

        storage.mark_clean("practice");
        assert_eq!(storage.current_file, "practice");
        assert!(storage.ensure_saved().is_ok());
    }

    #[test]
    fn formatted_marks_the_default_file() {
        let storage = StorageState::new("de_dust2");
        assert_eq!(
            storage.formatted("lineup_dust2", "de_dust2"),
            "lineup_dust2.txt (default file)"
        );
        assert_eq!(storage.formatted("practice", "de_dust2"), "practice.txt");
    }
}
