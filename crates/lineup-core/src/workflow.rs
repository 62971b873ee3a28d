use crate::error::{LineupError, Result};
use crate::host::Host;
use crate::lineup::grenade_kind_from;
use crate::session::{Runtime, Sched};
use crate::storage;
use crate::types::{Anchor, SoundCue};

// ---------------------------------------------------------------------------
// AnnotationJob
// ---------------------------------------------------------------------------

/// A deferred annotation with every input fixed at capture time. The cache
/// may be overwritten while the job waits; the job must not notice.
pub struct AnnotationJob {
    pub grenade_kind: String,
    pub label: String,
    pub message: String,
}

impl AnnotationJob {
    fn run<H: Host>(&self, rt: &mut Runtime<H>) -> Result<()> {
        rt.host
            .create_grenade_annotation(&self.grenade_kind, &self.label)?;
        rt.panel.notify(self.message.clone());
        rt.host.play(SoundCue::CreateAnnotation);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Annotation workflow
// ---------------------------------------------------------------------------

impl<H: Host + 'static> Runtime<H> {
    fn require_cached(&self) -> Result<()> {
        if self.lineup.is_empty() {
            return Err(LineupError::EmptyCache);
        }
        Ok(())
    }

    /// Grenade-thrown event. While a primed throw is pending this resolves
    /// it; otherwise the cache is passively refreshed.
    pub fn handle_grenade_thrown(
        &mut self,
        sched: &mut Sched<H>,
        classifier: &str,
    ) -> Result<()> {
        if !self.lineup.awaiting_throw {
            let anchor = self.host.pawn_snapshot()?;
            let moving = self.host.is_moving_horizontally()?;
            self.lineup.record_throw(classifier, anchor, moving);
            return Ok(());
        }

        self.lineup.awaiting_throw = false;

        let kind = grenade_kind_from(classifier);
        self.lineup.grenade_kind = Some(kind.clone());

        // The anchor and label were fixed when the command was primed; the
        // throw event must not re-capture them.
        let anchor = self.lineup.anchor.ok_or(LineupError::EmptyCache)?;
        let label = self.lineup.pending_label.clone().unwrap_or_default();

        self.panel.notify("Grenade thrown, creating annotation...");
        self.settle_at(sched, anchor)?;
        self.schedule_annotation(
            sched,
            self.config.annotate_delay_ticks,
            AnnotationJob {
                grenade_kind: kind,
                label,
                message: "Annotated the primed throw".to_string(),
            },
        );
        self.storage.mark_dirty();
        Ok(())
    }

    /// Arm the next throw: capture the live position and orientation now,
    /// annotate when the grenade leaves the hand.
    pub fn prime_next_throw(&mut self, label: &str) -> Result<()> {
        let anchor = self.host.pawn_snapshot()?;
        let moving = self.host.is_moving_horizontally()?;

        self.lineup.anchor = Some(anchor);
        self.lineup.was_moving = moving;
        self.lineup.pending_label = Some(label.to_string());
        self.lineup.awaiting_throw = true;

        self.panel.notify(
            "/addnextthrow primed. Throw the grenade and it will be annotated automatically.",
        );
        Ok(())
    }

    /// Teleport back to the cached throw position and annotate from there.
    /// Refused for moving throws: the cached anchor does not reproduce them.
    pub fn auto_add(&mut self, sched: &mut Sched<H>, label: &str) -> Result<()> {
        self.require_cached()?;
        if self.lineup.was_moving {
            return Err(LineupError::MovingThrow);
        }

        let anchor = self.lineup.anchor.ok_or(LineupError::EmptyCache)?;
        let kind = self
            .lineup
            .grenade_kind
            .clone()
            .ok_or(LineupError::EmptyCache)?;

        self.panel.notify("Auto-annotating the last thrown grenade...");
        self.settle_at(sched, anchor)?;
        self.schedule_annotation(
            sched,
            self.config.freeze_ticks,
            AnnotationJob {
                grenade_kind: kind,
                label: label.to_string(),
                message: "Auto-annotated the last-thrown grenade".to_string(),
            },
        );
        self.storage.mark_dirty();
        Ok(())
    }

    /// Annotate immediately from wherever the player stands now, reusing the
    /// cached grenade kind. No teleport, no scheduling.
    pub fn add_using_current_position(&mut self, label: &str, message: &str) -> Result<()> {
        self.require_cached()?;
        let kind = self
            .lineup
            .grenade_kind
            .clone()
            .ok_or(LineupError::EmptyCache)?;

        self.host.create_grenade_annotation(&kind, label)?;
        self.panel.notify(message);
        self.host.play(SoundCue::CreateAnnotation);
        self.storage.mark_dirty();
        Ok(())
    }

    /// Arm the next weapon shot to annotate the cached grenade from the
    /// position the shot is fired from.
    pub fn prime_next_shot(&mut self, label: &str) -> Result<()> {
        self.require_cached()?;
        self.lineup.pending_label = Some(label.to_string());
        self.lineup.awaiting_shot = true;

        self.panel.notify(
            "/addshot primed. Return to the lineup position, then fire any weapon to create the annotation.",
        );
        Ok(())
    }

    /// Weapon-fired event: a no-op unless a shot is primed.
    pub fn handle_weapon_fired(&mut self) -> Result<()> {
        if !self.lineup.awaiting_shot {
            return Ok(());
        }
        self.lineup.awaiting_shot = false;

        let label = self.lineup.pending_label.clone().unwrap_or_default();
        self.add_using_current_position(
            &label,
            "Annotated the last-thrown grenade using the shot direction",
        )
    }

    /// Teleport to `anchor`, zero momentum, and hold the pawn there: movement
    /// frozen and look angle pinned for the whole settle window, crouch
    /// restored if the throw was crouched. Re-arming replaces any running
    /// hold instead of stacking a second one.
    fn settle_at(&mut self, sched: &mut Sched<H>, anchor: Anchor) -> Result<()> {
        let hold_ticks = self.config.freeze_ticks;

        self.host.zero_velocity()?;
        self.host.teleport(anchor.location)?;
        self.host.set_look_angles(anchor.angles)?;
        self.host.play(SoundCue::Teleport);

        self.host.freeze_movement()?;
        sched.schedule_once(hold_ticks, |rt: &mut Runtime<H>| {
            rt.host.unfreeze_movement()
        });

        if let Some(id) = self.look_hold.take() {
            sched.cancel(id);
        }
        let angles = anchor.angles;
        self.look_hold = Some(sched.schedule_repeating(
            0,
            hold_ticks,
            move |rt: &mut Runtime<H>| rt.host.set_look_angles(angles),
        ));

        if anchor.crouched {
            self.host.crouch()?;
            sched.schedule_once(hold_ticks, |rt: &mut Runtime<H>| rt.host.uncrouch());
        }
        Ok(())
    }

    fn schedule_annotation(&mut self, sched: &mut Sched<H>, delay: u32, job: AnnotationJob) {
        sched.schedule_once(delay, move |rt: &mut Runtime<H>| job.run(rt));
    }

    // -----------------------------------------------------------------------
    // One-shot commands
    // -----------------------------------------------------------------------

    pub fn rethrow(&mut self) -> Result<()> {
        self.require_cached()?;
        self.host.rethrow_last_grenade()?;
        self.panel.notify("Re-throwing the last grenade you threw");
        Ok(())
    }

    pub fn cleanup(&mut self) -> Result<()> {
        self.host.kill_live_grenades()?;
        self.panel.notify("Cleaned up live grenades.");
        Ok(())
    }

    pub fn toggle_crouch(&mut self) -> Result<()> {
        if self.host.is_crouched()? {
            self.host.uncrouch()?;
            self.panel.notify("Uncrouched");
        } else {
            self.host.crouch()?;
            self.panel
                .notify("Crouched. Repeat /crouch (/c) to stand back up.");
        }
        Ok(())
    }

    pub fn add_spot(&mut self) -> Result<()> {
        self.host.create_spot_annotation()?;
        self.storage.mark_dirty();
        Ok(())
    }

    pub fn add_text(&mut self, title: &str, description: &str) -> Result<()> {
        if title.is_empty() && description.is_empty() {
            return Err(LineupError::TextNeedsContent);
        }
        self.host.create_text_annotation(title, description)?;
        self.storage.mark_dirty();
        Ok(())
    }

    pub fn undo_last(&mut self) -> Result<()> {
        self.host.delete_last_annotation()?;
        self.storage.mark_dirty();
        self.panel.notify("Removed the last annotation");
        self.host.play(SoundCue::RemoveAnnotation);
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<()> {
        self.host.clear_annotations()?;
        self.storage.mark_dirty();
        self.panel.notify("Cleared all annotations.");
        self.host.play(SoundCue::RemoveAnnotation);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Host-side persistence
    // -----------------------------------------------------------------------

    pub fn save_current(&mut self) -> Result<()> {
        let filename = self.storage.current_file.clone();
        self.save_as(&filename)
    }

    pub fn save_as(&mut self, filename: &str) -> Result<()> {
        storage::validate_filename(filename, true)?;
        self.host.save_annotations(filename)?;
        self.storage.mark_clean(filename);

        let formatted = self.storage.formatted(filename, &self.host.map_name());
        self.panel.notify(format!("Saved annotations to {formatted}"));
        self.host.play(SoundCue::Save);
        Ok(())
    }

    pub fn load_file(&mut self, filename: &str) -> Result<()> {
        storage::validate_filename(filename, false)?;
        self.storage.ensure_saved()?;
        self.host.load_annotations(filename)?;
        self.storage.mark_clean(filename);

        let formatted = self.storage.formatted(filename, &self.host.map_name());
        self.panel
            .notify(format!("Loaded annotations from {formatted}"));
        self.host.play(SoundCue::Load);
        Ok(())
    }

    pub fn load_default(&mut self) -> Result<()> {
        let filename = storage::default_filename(&self.host.map_name());
        self.load_file(&filename)
    }

    pub fn reload(&mut self) -> Result<()> {
        let filename = self.storage.current_file.clone();
        self.load_file(&filename)
    }

    pub fn append_file(&mut self, filename: &str) -> Result<()> {
        storage::validate_filename(filename, false)?;
        // Appending is irreversible short of undoing every annotation, so
        // refuse while unsaved changes could be mixed in.
        self.storage.ensure_saved()?;
        self.host.append_annotations(filename)?;
        self.storage.mark_dirty();
        self.panel
            .notify(format!("Appended annotations from {filename}.txt"));
        Ok(())
    }

    pub fn append_preset(&mut self) -> Result<()> {
        let map = self.host.map_name();
        let filename = storage::preset_filename(&map)?;
        self.append_file(&filename)?;
        self.panel
            .notify(format!("Appended the premade annotation set for {map}"));
        Ok(())
    }

    pub fn discard_changes(&mut self) -> Result<()> {
        self.storage.unsaved_changes = false;
        let filename = self.storage.current_file.clone();
        self.load_file(&filename)?;

        let formatted = self.storage.formatted(&filename, &self.host.map_name());
        self.panel
            .notify(format!("Discarded all changes to {formatted}"));
        self.host.play(SoundCue::RemoveAnnotation);
        Ok(())
    }
}
