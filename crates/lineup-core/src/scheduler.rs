use crate::error::{LineupError, Result};

// ---------------------------------------------------------------------------
// TaskId / TaskMode
// ---------------------------------------------------------------------------

/// Stable handle returned from `schedule_once` / `schedule_repeating`,
/// usable to cancel a task that has not yet completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug)]
enum TaskMode {
    Once,
    Repeating { remaining: u32 },
}

type TaskAction<C> = Box<dyn FnMut(&mut C) -> Result<()>>;

struct ScheduledTask<C> {
    id: TaskId,
    ticks_until_fire: u32,
    mode: TaskMode,
    action: TaskAction<C>,
}

// ---------------------------------------------------------------------------
// TickScheduler
// ---------------------------------------------------------------------------

/// Discrete-tick cooperative scheduler. Actions run against a caller-owned
/// context `C` handed to every `advance` call, so deferred work never needs
/// shared mutable state. Single-threaded: the owner must funnel all calls
/// through one logical thread.
pub struct TickScheduler<C> {
    tasks: Vec<ScheduledTask<C>>,
    next_id: u64,
}

impl<C> Default for TickScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TickScheduler<C> {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `action` to fire exactly once, on the `(delay_ticks + 1)`-th
    /// `advance` call from now. A delay of 0 fires on the very next advance.
    pub fn schedule_once(
        &mut self,
        delay_ticks: u32,
        action: impl FnMut(&mut C) -> Result<()> + 'static,
    ) -> TaskId {
        self.push(delay_ticks, TaskMode::Once, Box::new(action))
    }

    /// Schedule `action` to fire once per advance for `repeat_count`
    /// consecutive advances after the initial delay elapses. A repeat count
    /// of 0 is clamped to 1.
    pub fn schedule_repeating(
        &mut self,
        initial_delay_ticks: u32,
        repeat_count: u32,
        action: impl FnMut(&mut C) -> Result<()> + 'static,
    ) -> TaskId {
        self.push(
            initial_delay_ticks,
            TaskMode::Repeating {
                remaining: repeat_count.max(1),
            },
            Box::new(action),
        )
    }

    fn push(&mut self, delay: u32, mode: TaskMode, action: TaskAction<C>) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(ScheduledTask {
            id,
            ticks_until_fire: delay,
            mode,
            action,
        });
        id
    }

    /// Remove a pending task. Returns false if the task already completed
    /// or was never scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Process every pending task exactly once: fire tasks whose countdown
    /// has reached zero, decrement the rest. Completed tasks are collected
    /// during the pass and swept afterwards, so removal never skips or
    /// double-fires a neighbor. A failing action is isolated at the task
    /// boundary; its error is returned alongside the others.
    pub fn advance(&mut self, ctx: &mut C) -> Vec<LineupError> {
        let mut errors = Vec::new();
        let mut completed = Vec::new();

        for task in &mut self.tasks {
            if task.ticks_until_fire > 0 {
                task.ticks_until_fire -= 1;
                continue;
            }

            if let Err(err) = (task.action)(ctx) {
                errors.push(err);
            }

            match &mut task.mode {
                TaskMode::Once => completed.push(task.id),
                TaskMode::Repeating { remaining } => {
                    *remaining -= 1;
                    if *remaining == 0 {
                        completed.push(task.id);
                    }
                }
            }
        }

        if !completed.is_empty() {
            self.tasks.retain(|t| !completed.contains(&t.id));
        }
        errors
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        fired: Vec<&'static str>,
    }

    #[test]
    fn once_fires_on_the_n_plus_first_advance() {
        for delay in 0..4u32 {
            let mut sched: TickScheduler<Counter> = TickScheduler::new();
            let mut ctx = Counter::default();
            sched.schedule_once(delay, |c| {
                c.fired.push("f");
                Ok(())
            });

            for _ in 0..delay {
                sched.advance(&mut ctx);
                assert!(ctx.fired.is_empty(), "fired early at delay {delay}");
            }
            sched.advance(&mut ctx);
            assert_eq!(ctx.fired.len(), 1, "did not fire at delay {delay}");
        }
    }

    #[test]
    fn once_never_refires() {
        let mut sched: TickScheduler<Counter> = TickScheduler::new();
        let mut ctx = Counter::default();
        sched.schedule_once(0, |c| {
            c.fired.push("f");
            Ok(())
        });

        for _ in 0..5 {
            sched.advance(&mut ctx);
        }
        assert_eq!(ctx.fired.len(), 1);
        assert!(sched.is_empty());
    }

    #[test]
    fn repeating_fires_exactly_repeat_count_times() {
        let mut sched: TickScheduler<Counter> = TickScheduler::new();
        let mut ctx = Counter::default();
        sched.schedule_repeating(0, 3, |c| {
            c.fired.push("r");
            Ok(())
        });

        for expected in 1..=3 {
            sched.advance(&mut ctx);
            assert_eq!(ctx.fired.len(), expected);
        }
        sched.advance(&mut ctx);
        assert_eq!(ctx.fired.len(), 3, "fired past its repeat count");
        assert!(sched.is_empty());
    }

    #[test]
    fn repeating_honors_initial_delay() {
        let mut sched: TickScheduler<Counter> = TickScheduler::new();
        let mut ctx = Counter::default();
        sched.schedule_repeating(2, 2, |c| {
            c.fired.push("r");
            Ok(())
        });

        sched.advance(&mut ctx);
        sched.advance(&mut ctx);
        assert!(ctx.fired.is_empty());
        sched.advance(&mut ctx);
        assert_eq!(ctx.fired.len(), 1);
        sched.advance(&mut ctx);
        assert_eq!(ctx.fired.len(), 2);
        assert!(sched.is_empty());
    }

    #[test]
    fn zero_repeat_count_is_clamped_to_one() {
        let mut sched: TickScheduler<Counter> = TickScheduler::new();
        let mut ctx = Counter::default();
        sched.schedule_repeating(0, 0, |c| {
            c.fired.push("r");
            Ok(())
        });
        sched.advance(&mut ctx);
        sched.advance(&mut ctx);
        assert_eq!(ctx.fired.len(), 1);
    }

    #[test]
    fn completion_mid_pass_does_not_skip_neighbors() {
        let mut sched: TickScheduler<Counter> = TickScheduler::new();
        let mut ctx = Counter::default();
        sched.schedule_once(0, |c| {
            c.fired.push("a");
            Ok(())
        });
        sched.schedule_once(1, |c| {
            c.fired.push("b");
            Ok(())
        });
        sched.schedule_once(0, |c| {
            c.fired.push("c");
            Ok(())
        });

        sched.advance(&mut ctx);
        assert_eq!(ctx.fired, vec!["a", "c"]);
        sched.advance(&mut ctx);
        assert_eq!(ctx.fired, vec!["a", "c", "b"]);
    }

    #[test]
    fn failing_action_does_not_block_others() {
        let mut sched: TickScheduler<Counter> = TickScheduler::new();
        let mut ctx = Counter::default();
        sched.schedule_once(0, |_| Err(LineupError::Host("boom".to_string())));
        sched.schedule_once(0, |c| {
            c.fired.push("ok");
            Ok(())
        });

        let errors = sched.advance(&mut ctx);
        assert_eq!(errors.len(), 1);
        assert_eq!(ctx.fired, vec!["ok"]);
        assert!(sched.is_empty());
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut sched: TickScheduler<Counter> = TickScheduler::new();
        let mut ctx = Counter::default();
        let keep = sched.schedule_once(0, |c| {
            c.fired.push("keep");
            Ok(())
        });
        let drop = sched.schedule_once(0, |c| {
            c.fired.push("drop");
            Ok(())
        });

        assert!(sched.cancel(drop));
        assert!(!sched.cancel(drop), "double cancel should report false");
        sched.advance(&mut ctx);
        assert_eq!(ctx.fired, vec!["keep"]);
        assert!(!sched.cancel(keep), "completed task is not cancellable");
    }
}
