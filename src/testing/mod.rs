//! Host-side stand-ins for the board: a recording output sink and a manually
//! fired tick timer.

use crate::hal::{OutputSink, TickTimer, TimerConfig};
use crate::rtos::{TaskId, TickState, MAX_TASKS};

const EVENT_CAPACITY: usize = 128;

/// Output sink that keeps per-task state, toggle counts and the ordered list
/// of toggles it received. Recording stops once `EVENT_CAPACITY` toggles are
/// stored; state and counts keep tracking.
pub struct RecordingSink {
    state: [bool; MAX_TASKS],
    toggles: [u32; MAX_TASKS],
    events: [(TaskId, bool); EVENT_CAPACITY],
    len: usize,
}

impl RecordingSink {
    pub const fn new() -> Self {
        Self {
            state: [false; MAX_TASKS],
            toggles: [0; MAX_TASKS],
            events: [(TaskId(0), false); EVENT_CAPACITY],
            len: 0,
        }
    }

    pub fn toggles(&self, task: TaskId) -> u32 {
        self.toggles.get(task.0 as usize).copied().unwrap_or(0)
    }

    pub fn total_toggles(&self) -> u32 {
        self.toggles.iter().sum()
    }

    /// `(task, new state)` per toggle, oldest first
    pub fn events(&self) -> &[(TaskId, bool)] {
        &self.events[..self.len]
    }

    pub fn clear_events(&mut self) {
        self.len = 0;
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for RecordingSink {
    fn toggle(&mut self, task: TaskId) {
        let index = task.0 as usize;
        if index >= MAX_TASKS {
            return;
        }
        self.state[index] = !self.state[index];
        self.toggles[index] += 1;
        if self.len < EVENT_CAPACITY {
            self.events[self.len] = (task, self.state[index]);
            self.len += 1;
        }
    }

    fn set(&mut self, task: TaskId, on: bool) {
        if let Some(state) = self.state.get_mut(task.0 as usize) {
            *state = on;
        }
    }

    fn is_on(&self, task: TaskId) -> bool {
        self.state.get(task.0 as usize).copied().unwrap_or(false)
    }
}

/// Tick source driven by hand. Fires only after it has been started.
pub struct ManualTimer {
    config: Option<TimerConfig>,
}

impl ManualTimer {
    pub const fn new() -> Self {
        Self { config: None }
    }

    pub fn config(&self) -> Option<TimerConfig> {
        self.config
    }

    /// Simulate one compare match: the interrupt handler's only job.
    pub fn fire<const N: usize>(&self, ticks: &TickState<N>) {
        if self.config.is_some() {
            ticks.on_tick();
        }
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TickTimer for ManualTimer {
    fn start(&mut self, config: TimerConfig) {
        self.config = Some(config);
    }
}
