use lineup_core::error::Result;
use lineup_core::host::Host;
use lineup_core::types::{Anchor, Color, EulerAngles, SoundCue, Vec3};

// ---------------------------------------------------------------------------
// TraceHost
// ---------------------------------------------------------------------------

/// Stand-in for the game engine: every state-changing host call is printed
/// to stdout (one line per call, or one JSON object with `--json`), and
/// queries answer from fields the session script can set. Per-tick screen
/// drawing is routed to trace-level logging so it does not drown the trace.
pub struct TraceHost {
    json: bool,
    pub location: Vec3,
    pub angles: EulerAngles,
    pub crouched: bool,
    pub moving: bool,
    pub map: String,
    pub rounds: u32,
}

impl TraceHost {
    pub fn new(map: String, json: bool) -> Self {
        Self {
            json,
            location: Vec3::ZERO,
            angles: EulerAngles::default(),
            crouched: false,
            moving: false,
            map,
            rounds: 0,
        }
    }

    fn emit(&self, line: &str, json: serde_json::Value) {
        if self.json {
            println!("{json}");
        } else {
            println!("host: {line}");
        }
    }
}

impl Host for TraceHost {
    fn teleport(&mut self, location: Vec3) -> Result<()> {
        self.location = location;
        self.emit(
            &format!("teleport {location}"),
            serde_json::json!({"call": "teleport", "x": location.x, "y": location.y, "z": location.z}),
        );
        Ok(())
    }

    fn set_look_angles(&mut self, angles: EulerAngles) -> Result<()> {
        self.angles = angles;
        self.emit(
            &format!("setang {angles}"),
            serde_json::json!({"call": "setang", "pitch": angles.pitch, "yaw": angles.yaw, "roll": angles.roll}),
        );
        Ok(())
    }

    fn zero_velocity(&mut self) -> Result<()> {
        self.emit("zero_velocity", serde_json::json!({"call": "zero_velocity"}));
        Ok(())
    }

    fn crouch(&mut self) -> Result<()> {
        self.crouched = true;
        self.emit("crouch", serde_json::json!({"call": "crouch"}));
        Ok(())
    }

    fn uncrouch(&mut self) -> Result<()> {
        self.crouched = false;
        self.emit("uncrouch", serde_json::json!({"call": "uncrouch"}));
        Ok(())
    }

    fn freeze_movement(&mut self) -> Result<()> {
        self.emit("freeze_movement", serde_json::json!({"call": "freeze_movement"}));
        Ok(())
    }

    fn unfreeze_movement(&mut self) -> Result<()> {
        self.emit(
            "unfreeze_movement",
            serde_json::json!({"call": "unfreeze_movement"}),
        );
        Ok(())
    }

    fn say(&mut self, text: &str) -> Result<()> {
        self.emit(
            &format!("say {text}"),
            serde_json::json!({"call": "say", "text": text}),
        );
        Ok(())
    }

    fn console_msg(&mut self, text: &str) {
        if self.json {
            println!("{}", serde_json::json!({"call": "console", "text": text}));
        } else {
            println!("{text}");
        }
    }

    fn screen_text(&mut self, text: &str, row: u32, _color: Color) {
        tracing::trace!(row, text, "screen_text");
    }

    fn play(&mut self, cue: SoundCue) {
        self.emit(
            &format!("play {cue}"),
            serde_json::json!({"call": "play", "cue": cue.as_str()}),
        );
    }

    fn create_grenade_annotation(&mut self, kind: &str, label: &str) -> Result<()> {
        self.emit(
            &format!("annotation_create grenade {kind} \"{label}\""),
            serde_json::json!({"call": "annotation_create", "variant": "grenade", "kind": kind, "label": label}),
        );
        Ok(())
    }

    fn create_spot_annotation(&mut self) -> Result<()> {
        self.emit(
            "annotation_create spot",
            serde_json::json!({"call": "annotation_create", "variant": "spot"}),
        );
        Ok(())
    }

    fn create_text_annotation(&mut self, title: &str, description: &str) -> Result<()> {
        self.emit(
            &format!("annotation_create text \"{title}\" \"{description}\""),
            serde_json::json!({"call": "annotation_create", "variant": "text", "title": title, "description": description}),
        );
        Ok(())
    }

    fn save_annotations(&mut self, filename: &str) -> Result<()> {
        self.emit(
            &format!("annotation_save {filename}"),
            serde_json::json!({"call": "annotation_save", "filename": filename}),
        );
        Ok(())
    }

    fn load_annotations(&mut self, filename: &str) -> Result<()> {
        self.emit(
            &format!("annotation_load {filename}"),
            serde_json::json!({"call": "annotation_load", "filename": filename}),
        );
        Ok(())
    }

    fn append_annotations(&mut self, filename: &str) -> Result<()> {
        self.emit(
            &format!("annotation_append {filename}"),
            serde_json::json!({"call": "annotation_append", "filename": filename}),
        );
        Ok(())
    }

    fn clear_annotations(&mut self) -> Result<()> {
        self.emit("annotation_clear", serde_json::json!({"call": "annotation_clear"}));
        Ok(())
    }

    fn delete_last_annotation(&mut self) -> Result<()> {
        self.emit(
            "annotation_delete_last",
            serde_json::json!({"call": "annotation_delete_last"}),
        );
        Ok(())
    }

    fn rethrow_last_grenade(&mut self) -> Result<()> {
        self.emit(
            "rethrow_last_grenade",
            serde_json::json!({"call": "rethrow_last_grenade"}),
        );
        Ok(())
    }

    fn kill_live_grenades(&mut self) -> Result<()> {
        self.emit(
            "kill_live_grenades",
            serde_json::json!({"call": "kill_live_grenades"}),
        );
        Ok(())
    }

    fn toggle_radar(&mut self) -> Result<()> {
        self.emit("toggle_radar", serde_json::json!({"call": "toggle_radar"}));
        Ok(())
    }

    fn restart_match(&mut self) -> Result<()> {
        self.emit("restart_match", serde_json::json!({"call": "restart_match"}));
        Ok(())
    }

    fn pawn_snapshot(&mut self) -> Result<Anchor> {
        Ok(Anchor {
            location: self.location,
            angles: self.angles,
            crouched: self.crouched,
        })
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
