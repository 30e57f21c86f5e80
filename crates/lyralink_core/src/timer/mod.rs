//! Caller-driven timers.
//!
//! The scheduler owns no thread. The caller advances it to the current
//! wall-clock instant and every task that has come due runs once.
//!
//! ```ignore
//! let scheduler = Scheduler::new(clock.now());
//! let _tick = scheduler.set_interval(ElapsedTicker::period(), move || refresh());
//! // In the host loop:
//! scheduler.advance_to(clock.now());
//! ```
//!
//! # Invariants
//! - Dropping a handle cancels its task, including from inside a callback.
//! - An interval that fell several periods behind fires once, then realigns
//!   to its first due time plus whole periods.

mod reveal;

pub use reveal::{
    ElapsedTicker, RevealStep, TerminalReveal, Typewriter, TypewriterStep, TERMINAL_LETTER,
};

use chrono::{DateTime, Duration, Utc};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Callback = Box<dyn FnMut()>;

struct Task {
    due: DateTime<Utc>,
    period: Option<Duration>,
    /// `None` while the callback is running.
    callback: Option<Callback>,
}

struct SchedulerState {
    now: DateTime<Utc>,
    next_id: u64,
    tasks: BTreeMap<u64, Task>,
}

/// Single-threaded timer queue.
#[derive(Clone)]
pub struct Scheduler {
    state: Rc<RefCell<SchedulerState>>,
}

/// Keeps a scheduled task alive. Dropping it cancels the task.
#[must_use = "dropping the handle cancels the timer"]
pub struct TimerHandle {
    id: u64,
    state: Weak<RefCell<SchedulerState>>,
}

impl TimerHandle {
    /// Cancels now instead of at drop.
    pub fn cancel(self) {}

    pub fn is_active(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.borrow().tasks.contains_key(&self.id))
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            if let Ok(mut state) = state.try_borrow_mut() {
                state.tasks.remove(&self.id);
            }
        }
    }
}

impl Scheduler {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SchedulerState {
                now,
                next_id: 0,
                tasks: BTreeMap::new(),
            })),
        }
    }

    /// Instant of the last [`Scheduler::advance_to`].
    pub fn now(&self) -> DateTime<Utc> {
        self.state.borrow().now
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Runs `callback` every `period`, first one period from now.
    pub fn set_interval(&self, period: Duration, callback: impl FnMut() + 'static) -> TimerHandle {
        let period = period.max(Duration::milliseconds(1));
        self.schedule(period, Some(period), Box::new(callback))
    }

    /// Runs `callback` once after `delay`.
    pub fn set_timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerHandle {
        let mut callback = Some(callback);
        self.schedule(
            delay,
            None,
            Box::new(move || {
                if let Some(callback) = callback.take() {
                    callback();
                }
            }),
        )
    }

    fn schedule(&self, delay: Duration, period: Option<Duration>, callback: Callback) -> TimerHandle {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let due = state.now + delay.max(Duration::zero());
        state.tasks.insert(
            id,
            Task {
                due,
                period,
                callback: Some(callback),
            },
        );
        TimerHandle {
            id,
            state: Rc::downgrade(&self.state),
        }
    }

    /// Moves the clock to `now` and runs every due task in due order.
    ///
    /// Returns how many callbacks ran. Tasks scheduled by a callback run no
    /// earlier than the next advance.
    pub fn advance_to(&self, now: DateTime<Utc>) -> usize {
        let due = {
            let mut state = self.state.borrow_mut();
            if now > state.now {
                state.now = now;
            }
            let now = state.now;
            let mut due: Vec<(DateTime<Utc>, u64)> = state
                .tasks
                .iter()
                .filter(|(_, task)| task.due <= now && task.callback.is_some())
                .map(|(id, task)| (task.due, *id))
                .collect();
            due.sort();
            due
        };

        let mut fired = 0;
        for (_, id) in due {
            let taken = {
                let mut state = self.state.borrow_mut();
                state.tasks.get_mut(&id).and_then(|task| task.callback.take())
            };
            let Some(mut callback) = taken else {
                continue;
            };

            callback();
            fired += 1;

            let mut state = self.state.borrow_mut();
            let now = state.now;
            let Some(task) = state.tasks.get_mut(&id) else {
                continue;
            };
            match task.period {
                Some(period) => {
                    task.due = next_due(task.due, period, now);
                    task.callback = Some(callback);
                }
                None => {
                    state.tasks.remove(&id);
                }
            }
        }
        fired
    }
}

/// First instant on the `due + k * period` grid strictly after `now`.
fn next_due(due: DateTime<Utc>, period: Duration, now: DateTime<Utc>) -> DateTime<Utc> {
    let period_ms = period.num_milliseconds().max(1);
    let behind_ms = (now - due).num_milliseconds().max(0);
    let skipped = behind_ms / period_ms + 1;
    due + Duration::milliseconds(skipped * period_ms)
}
