use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Leading character that marks a chat line as a command.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: char,

    /// Ticks between a primed throw resolving and its annotation being
    /// created (lets the projectile clear the player's view first).
    #[serde(default = "default_annotate_delay")]
    pub annotate_delay_ticks: u32,

    /// Length of the settle window after a teleport: movement is frozen and
    /// the look angle pinned for this many ticks, and the deferred
    /// annotation fires when the window ends.
    #[serde(default = "default_freeze_ticks")]
    pub freeze_ticks: u32,

    /// Delay before the copy-to-clipboard tip is relayed to chat.
    #[serde(default = "default_chat_tip_delay")]
    pub chat_tip_delay_ticks: u32,

    /// Delay before a console message is relayed to chat, long enough to
    /// land after the engine's own echo of the triggering command.
    #[serde(default = "default_chat_relay_delay")]
    pub chat_relay_delay_ticks: u32,

    #[serde(default = "default_table_columns")]
    pub help_table_columns: usize,

    #[serde(default = "default_table_width")]
    pub help_table_width: usize,
}

fn default_command_prefix() -> char {
    '/'
}

fn default_annotate_delay() -> u32 {
    64
}

fn default_freeze_ticks() -> u32 {
    64
}

fn default_chat_tip_delay() -> u32 {
    16
}

fn default_chat_relay_delay() -> u32 {
    48
}

fn default_table_columns() -> usize {
    3
}

fn default_table_width() -> usize {
    48
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            annotate_delay_ticks: default_annotate_delay(),
            freeze_ticks: default_freeze_ticks(),
            chat_tip_delay_ticks: default_chat_tip_delay(),
            chat_relay_delay_ticks: default_chat_relay_delay(),
            help_table_columns: default_table_columns(),
            help_table_width: default_table_width(),
        }
    }
}

impl SessionConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: SessionConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.command_prefix, '/');
        assert_eq!(config.annotate_delay_ticks, 64);
        assert_eq!(config.freeze_ticks, 64);
        assert_eq!(config.help_table_columns, 3);
        assert_eq!(config.help_table_width, 48);
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config: SessionConfig =
            serde_yaml::from_str("command_prefix: '!'\nfreeze_ticks: 32\n").unwrap();
        assert_eq!(config.command_prefix, '!');
        assert_eq!(config.freeze_ticks, 32);
        assert_eq!(config.annotate_delay_ticks, 64);
    }

    #[test]
    fn load_reads_a_yaml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("lineup.yaml");
        std::fs::write(&path, "annotate_delay_ticks: 16\n").unwrap();
        let config = SessionConfig::load(&path).unwrap();
        assert_eq!(config.annotate_delay_ticks, 16);
    }

    #[test]
    fn load_surfaces_missing_file_as_io_error() {
        let err = SessionConfig::load(Path::new("/nonexistent/lineup.yaml")).unwrap_err();
        assert!(matches!(err, crate::error::LineupError::Io(_)));
    }
}
