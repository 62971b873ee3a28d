use crate::error::Result;
use crate::types::{Anchor, Color, EulerAngles, SoundCue, Vec3};

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Everything the core needs from the embedding game engine. Fallible
/// engine operations return `Result` so host failures surface through the
/// normal error channel instead of aborting the session; pure display
/// operations are best-effort and infallible.
pub trait Host {
    // -- pawn commands
    fn teleport(&mut self, location: Vec3) -> Result<()>;
    fn set_look_angles(&mut self, angles: EulerAngles) -> Result<()>;
    fn zero_velocity(&mut self) -> Result<()>;
    fn crouch(&mut self) -> Result<()>;
    fn uncrouch(&mut self) -> Result<()>;
    fn freeze_movement(&mut self) -> Result<()>;
    fn unfreeze_movement(&mut self) -> Result<()>;

    // -- output
    fn say(&mut self, text: &str) -> Result<()>;
    fn console_msg(&mut self, text: &str);
    fn screen_text(&mut self, text: &str, row: u32, color: Color);
    fn play(&mut self, cue: SoundCue);

    // -- annotations (persistence is host-side, addressed by filename)
    fn create_grenade_annotation(&mut self, kind: &str, label: &str) -> Result<()>;
    fn create_spot_annotation(&mut self) -> Result<()>;
    fn create_text_annotation(&mut self, title: &str, description: &str) -> Result<()>;
    fn save_annotations(&mut self, filename: &str) -> Result<()>;
    fn load_annotations(&mut self, filename: &str) -> Result<()>;
    fn append_annotations(&mut self, filename: &str) -> Result<()>;
    fn clear_annotations(&mut self) -> Result<()>;
    fn delete_last_annotation(&mut self) -> Result<()>;

    // -- session commands
    fn rethrow_last_grenade(&mut self) -> Result<()>;
    fn kill_live_grenades(&mut self) -> Result<()>;
    fn toggle_radar(&mut self) -> Result<()>;
    fn restart_match(&mut self) -> Result<()>;

    // -- queries
    fn pawn_snapshot(&mut self) -> Result<Anchor>;
    fn is_moving_horizontally(&mut self) -> Result<bool>;
    fn is_crouched(&mut self) -> Result<bool>;
    fn map_name(&self) -> String;
    fn rounds_played(&self) -> u32;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every host call as a formatted line; queries answer from
    /// plain scripted fields.
    pub struct ScriptedHost {
        pub calls: Vec<String>,
        pub snapshot: Anchor,
        pub moving: bool,
        pub crouched: bool,
        pub map: String,
        pub rounds: u32,
        /// When set, the next fallible engine command fails once.
        pub fail_next: bool,
    }

    impl ScriptedHost {
        pub fn new() -> Self {
            Self {
                calls: Vec::new(),
                snapshot: Anchor::default(),
                moving: false,
                crouched: false,
                map: "de_dust2".to_string(),
                rounds: 0,
                fail_next: false,
            }
        }

        pub fn calls_matching(&self, prefix: &str) -> usize {
            self.calls.iter().filter(|c| c.starts_with(prefix)).count()
        }
    }

    impl Host for ScriptedHost {
        fn teleport(&mut self, location: Vec3) -> Result<()> {
            self.calls.push(format!("teleport {location}"));
            Ok(())
        }

        fn set_look_angles(&mut self, angles: EulerAngles) -> Result<()> {
            self.calls.push(format!("setang {angles}"));
            Ok(())
        }

        fn zero_velocity(&mut self) -> Result<()> {
            self.calls.push("zero_velocity".to_string());
            Ok(())
        }

        fn crouch(&mut self) -> Result<()> {
            self.crouched = true;
            self.calls.push("crouch".to_string());
            Ok(())
        }

        fn uncrouch(&mut self) -> Result<()> {
            self.crouched = false;
            self.calls.push("uncrouch".to_string());
            Ok(())
        }

        fn freeze_movement(&mut self) -> Result<()> {
            self.calls.push("freeze".to_string());
            Ok(())
        }

        fn unfreeze_movement(&mut self) -> Result<()> {
            self.calls.push("unfreeze".to_string());
            Ok(())
        }

        fn say(&mut self, text: &str) -> Result<()> {
            self.calls.push(format!("say {text}"));
            Ok(())
        }

        fn console_msg(&mut self, text: &str) {
            self.calls.push(format!("console {text}"));
        }

        fn screen_text(&mut self, _text: &str, _row: u32, _color: Color) {}

        fn play(&mut self, cue: SoundCue) {
            self.calls.push(format!("play {cue}"));
        }

        fn create_grenade_annotation(&mut self, kind: &str, label: &str) -> Result<()> {
            self.calls
                .push(format!("annotation_create grenade {kind} \"{label}\""));
            Ok(())
        }

        fn create_spot_annotation(&mut self) -> Result<()> {
            self.calls.push("annotation_create spot".to_string());
            Ok(())
        }

        fn create_text_annotation(&mut self, title: &str, description: &str) -> Result<()> {
            self.calls
                .push(format!("annotation_create text \"{title}\" \"{description}\""));
            Ok(())
        }

        fn save_annotations(&mut self, filename: &str) -> Result<()> {
            self.calls.push(format!("annotation_save {filename}"));
            Ok(())
        }

        fn load_annotations(&mut self, filename: &str) -> Result<()> {
            self.calls.push(format!("annotation_load {filename}"));
            Ok(())
        }

        fn append_annotations(&mut self, filename: &str) -> Result<()> {
            self.calls.push(format!("annotation_append {filename}"));
            Ok(())
        }

        fn clear_annotations(&mut self) -> Result<()> {
            self.calls.push("annotation_clear".to_string());
            Ok(())
        }

        fn delete_last_annotation(&mut self) -> Result<()> {
            self.calls.push("annotation_delete_last".to_string());
            Ok(())
        }

        fn rethrow_last_grenade(&mut self) -> Result<()> {
            self.calls.push("rethrow".to_string());
            Ok(())
        }

        fn kill_live_grenades(&mut self) -> Result<()> {
            self.calls.push("kill_live_grenades".to_string());
            Ok(())
        }

        fn toggle_radar(&mut self) -> Result<()> {
            if self.fail_next {
                self.fail_next = false;
                return Err(crate::error::LineupError::Host("radar offline".to_string()));
            }
            self.calls.push("toggle_radar".to_string());
            Ok(())
        }

        fn restart_match(&mut self) -> Result<()> {
            self.calls.push("restart_match".to_string());
            Ok(())
        }

        fn pawn_snapshot(&mut self) -> Result<Anchor> {
            Ok(self.snapshot)
        }

        fn is_moving_horizontally(&mut self) -> Result<bool> {
            Ok(self.moving)
        }

        fn is_crouched(&mut self) -> Result<bool> {
            Ok(self.crouched)
        }

        fn map_name(&self) -> String {
            self.map.clone()
        }

        fn rounds_played(&self) -> u32 {
            self.rounds
        }
    }
}
