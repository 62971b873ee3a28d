use crate::types::Anchor;

// ---------------------------------------------------------------------------
// LineupState
// ---------------------------------------------------------------------------

/// The single mutable record of the most recent throw context plus the two
/// priming flags. Exactly one instance exists per session.
#[derive(Debug, Default)]
pub struct LineupState {
    pub grenade_kind: Option<String>,
    pub anchor: Option<Anchor>,
    pub was_moving: bool,
    pub pending_label: Option<String>,
    // The two flags are deliberately independent: /addnextthrow and /addshot
    // may both be armed at once, and each resolves on its own event. Arming
    // both can therefore produce two annotations from one lineup.
    pub awaiting_throw: bool,
    pub awaiting_shot: bool,
}

impl LineupState {
    /// True until both a grenade kind and an anchor have been cached.
    /// Workflow operations that need a cached throw must check this first.
    pub fn is_empty(&self) -> bool {
        self.grenade_kind.is_none() || self.anchor.is_none()
    }

    /// Passive tracking: overwrite the cache from an unprimed throw.
    pub fn record_throw(&mut self, classifier: &str, anchor: Anchor, was_moving: bool) {
        self.grenade_kind = Some(grenade_kind_from(classifier));
        self.anchor = Some(anchor);
        self.was_moving = was_moving;
    }
}

/// Derive the short grenade kind the annotation command expects from a
/// projectile classifier, e.g. "smokegrenade_projectile" -> "smoke",
/// "flashbang_projectile" -> "flash".
pub fn grenade_kind_from(classifier: &str) -> String {
    classifier
        .replace("_projectile", "")
        .replace("grenade", "")
        .replace("bang", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EulerAngles, Vec3};

    #[test]
    fn kind_derivation_strips_known_substrings() {
        assert_eq!(grenade_kind_from("smokegrenade_projectile"), "smoke");
        assert_eq!(grenade_kind_from("flashbang_projectile"), "flash");
        assert_eq!(grenade_kind_from("hegrenade_projectile"), "he");
        assert_eq!(grenade_kind_from("molotov_projectile"), "molotov");
        assert_eq!(grenade_kind_from("decoy_projectile"), "decoy");
    }

    #[test]
    fn empty_until_kind_and_anchor_are_set() {
        let mut state = LineupState::default();
        assert!(state.is_empty());

        state.grenade_kind = Some("smoke".to_string());
        assert!(state.is_empty(), "anchor still missing");

        state.anchor = Some(Anchor {
            location: Vec3::new(1.0, 2.0, 3.0),
            angles: EulerAngles::default(),
            crouched: false,
        });
        assert!(!state.is_empty());
    }

    #[test]
    fn record_throw_overwrites_the_cache() {
        let mut state = LineupState::default();
        state.record_throw("smokegrenade_projectile", Anchor::default(), true);
        assert_eq!(state.grenade_kind.as_deref(), Some("smoke"));
        assert!(state.was_moving);

        state.record_throw("flashbang_projectile", Anchor::default(), false);
        assert_eq!(state.grenade_kind.as_deref(), Some("flash"));
        assert!(!state.was_moving);
    }
}
