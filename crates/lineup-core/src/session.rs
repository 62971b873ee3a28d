use crate::config::SessionConfig;
use crate::dispatch;
use crate::error::{ErrorKind, LineupError};
use crate::host::Host;
use crate::lineup::LineupState;
use crate::panel::{StatusPanel, WELCOME_MESSAGE};
use crate::scheduler::{TaskId, TickScheduler};
use crate::storage::StorageState;
use crate::types::SoundCue;

/// Scheduler specialization used throughout the workflow: deferred actions
/// run against the session runtime.
pub type Sched<H> = TickScheduler<Runtime<H>>;

// ---------------------------------------------------------------------------
// Runtime
// ---------------------------------------------------------------------------

/// Everything a command handler or deferred action can touch: the host plus
/// the session's passive state. The scheduler itself stays outside so an
/// in-flight `advance` can never mutate the task set it is walking.
pub struct Runtime<H: Host> {
    pub host: H,
    pub config: SessionConfig,
    pub lineup: LineupState,
    pub storage: StorageState,
    pub panel: StatusPanel,
    /// Look-angle hold repeater currently armed, if any. Replaced (not
    /// stacked) when a new settle window starts.
    pub(crate) look_hold: Option<TaskId>,
}

impl<H: Host> Runtime<H> {
    pub(crate) fn draw(&mut self) {
        let map = self.host.map_name();
        let Runtime {
            host,
            storage,
            lineup,
            panel,
            ..
        } = self;
        panel.draw(host, storage, lineup, &map);
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Composition root. The embedding host constructs one `Session` per
/// player/process and delivers chat lines, game events, and the per-frame
/// tick; everything else is wired internally. Not internally synchronized:
/// a multi-threaded embedding must serialize all calls.
pub struct Session<H: Host> {
    scheduler: Sched<H>,
    runtime: Runtime<H>,
}

impl<H: Host + 'static> Session<H> {
    pub fn new(host: H, config: SessionConfig) -> Self {
        let map = host.map_name();
        Self {
            scheduler: TickScheduler::new(),
            runtime: Runtime {
                host,
                config,
                lineup: LineupState::default(),
                storage: StorageState::new(&map),
                panel: StatusPanel::new(),
                look_hold: None,
            },
        }
    }

    /// A chat line from the player. Non-command chatter is ignored.
    pub fn chat_line(&mut self, text: &str) {
        let trimmed = text.trim();
        if !trimmed.starts_with(self.runtime.config.command_prefix) {
            return;
        }
        dispatch::dispatch(&mut self.runtime, &mut self.scheduler, trimmed);
    }

    /// A grenade-thrown engine event carrying the projectile classifier.
    pub fn grenade_thrown(&mut self, classifier: &str) {
        if let Err(err) = self
            .runtime
            .handle_grenade_thrown(&mut self.scheduler, classifier)
        {
            self.report(err);
        }
    }

    /// A weapon-fired engine event.
    pub fn weapon_fired(&mut self) {
        if let Err(err) = self.runtime.handle_weapon_fired() {
            self.report(err);
        }
    }

    /// Round start: load the map's default annotation file and greet the
    /// player on the first round.
    pub fn round_started(&mut self) {
        tracing::info!("round started; loading default annotations");
        if let Err(err) = self.runtime.load_default() {
            self.report(err);
        }
        if self.runtime.host.rounds_played() == 0 {
            self.runtime.panel.notify(WELCOME_MESSAGE);
        }
    }

    /// One discrete update cycle: run all due deferred actions, then redraw
    /// the panel. A failing action never stops the others or the loop.
    pub fn tick(&mut self) {
        for err in self.scheduler.advance(&mut self.runtime) {
            tracing::warn!(%err, "deferred task failed");
            self.runtime.panel.set_detailed_error(err.to_string());
        }
        self.runtime.draw();
    }

    fn report(&mut self, err: LineupError) {
        match err.kind() {
            ErrorKind::Validation => {
                self.runtime.panel.set_error(err.to_string());
                self.runtime.host.play(SoundCue::Error);
            }
            ErrorKind::Unexpected => {
                tracing::error!(%err, "event handler failed");
                self.runtime
                    .panel
                    .set_error("Something went wrong; check /debug for details.");
                self.runtime.panel.set_detailed_error(err.to_string());
                self.runtime.host.play(SoundCue::Error);
            }
        }
    }

    pub fn runtime(&self) -> &Runtime<H> {
        &self.runtime
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.runtime.host
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }
}
