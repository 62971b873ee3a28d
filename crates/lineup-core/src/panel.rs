use crate::host::Host;
use crate::lineup::LineupState;
use crate::storage::StorageState;
use crate::types::Color;

// Screen rows, matching the engine's debug-text grid.
const ROW_WATERMARK: u32 = 1;
const ROW_LOADED_FILE: u32 = 3;
const ROW_SAVE_STATE: u32 = 5;
const ROW_DEBUG_FIRST: u32 = 7;
const ROW_NOTIFICATION: u32 = 16;
const ROW_DETAIL: u32 = 20;
const ROW_ERROR: u32 = 22;

pub const WELCOME_MESSAGE: &str = "Welcome to lineup, a tool that makes annotating grenade lineups quick and simple.\n\
Use /help for a list of available commands.\n\
Use /demo for a link to the demonstration video.\n\
Use /preset to load a premade annotation set for this map.";

// ---------------------------------------------------------------------------
// StatusPanel
// ---------------------------------------------------------------------------

/// On-screen message rows: one notification slot, one error slot, and a
/// verbose diagnostic slot, redrawn every tick.
#[derive(Debug, Default)]
pub struct StatusPanel {
    notification: String,
    error: String,
    detailed_error: String,
    debug_mode: bool,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Setting a notification clears any visible error.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notification = message.into();
        self.error.clear();
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = message.into();
    }

    pub fn set_detailed_error(&mut self, message: impl Into<String>) {
        self.detailed_error = message.into();
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug_mode = !self.debug_mode;
        self.debug_mode
    }

    pub fn notification(&self) -> &str {
        &self.notification
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn detailed_error(&self) -> &str {
        &self.detailed_error
    }

    pub fn draw<H: Host>(
        &self,
        host: &mut H,
        storage: &StorageState,
        lineup: &LineupState,
        map: &str,
    ) {
        host.screen_text("lineup v0.1", ROW_WATERMARK, Color::GOLD);

        let loaded = storage.formatted(&storage.current_file, map);
        host.screen_text(
            &format!("Currently loaded annotation file: {loaded}"),
            ROW_LOADED_FILE,
            Color::WHITE,
        );

        if storage.unsaved_changes {
            host.screen_text(
                "You have unsaved changes. Use /save or /saveas before leaving the map or they will be lost.",
                ROW_SAVE_STATE,
                Color::RED,
            );
        } else {
            host.screen_text(
                "All annotations saved. You may quit the map safely.",
                ROW_SAVE_STATE,
                Color::GREEN,
            );
        }

        host.screen_text(&self.notification, ROW_NOTIFICATION, Color::WHITE);
        host.screen_text(&self.error, ROW_ERROR, Color::RED);

        if self.debug_mode {
            self.draw_debug(host, lineup);
        }
    }

    fn draw_debug<H: Host>(&self, host: &mut H, lineup: &LineupState) {
        let kind = lineup.grenade_kind.as_deref().unwrap_or("none");
        host.screen_text(
            &format!("cache.grenade_kind: {kind}"),
            ROW_DEBUG_FIRST,
            Color::WHITE,
        );

        let anchor = match lineup.anchor {
            Some(a) => format!("cache.anchor: {} / {}", a.location, a.angles),
            None => "cache.anchor: none".to_string(),
        };
        host.screen_text(&anchor, ROW_DEBUG_FIRST + 1, Color::WHITE);

        host.screen_text(
            &format!("cache.was_moving: {}", lineup.was_moving),
            ROW_DEBUG_FIRST + 2,
            Color::WHITE,
        );
        host.screen_text(
            &format!(
                "awaiting_throw: {} awaiting_shot: {}",
                lineup.awaiting_throw, lineup.awaiting_shot
            ),
            ROW_DEBUG_FIRST + 3,
            Color::WHITE,
        );

        if !self.detailed_error.is_empty() {
            host.screen_text(
                &format!("Detail: {}", self.detailed_error),
                ROW_DETAIL,
                Color::RED,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_clears_a_visible_error() {
        let mut panel = StatusPanel::new();
        panel.set_error("bad");
        panel.notify("done");
        assert_eq!(panel.notification(), "done");
        assert!(panel.error().is_empty());
    }

    #[test]
    fn debug_toggle_flips() {
        let mut panel = StatusPanel::new();
        assert!(panel.toggle_debug());
        assert!(!panel.toggle_debug());
    }
}
