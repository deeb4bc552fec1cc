//! Main dispatch loop

use super::duty::DutyTable;
use super::task::{TaskId, MAX_TASKS};
use super::tick::TickState;
use super::Phase;
use crate::hal::{OutputSink, TickTimer, TimerConfig};
use crate::logger::EventLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No work owed
    Idle,
    /// Actions for this phase were executed during the step
    Dispatching(Phase),
}

/// Cooperative tick-phase scheduler.
///
/// Owns the output sink and the duty table; shares only the `TickState` with
/// the tick interrupt.
pub struct Scheduler<'a, S, L, const N: usize> {
    table: &'a DutyTable<N>,
    ticks: &'a TickState<N>,
    sink: S,
    log: L,
}

impl<'a, S: OutputSink, L: EventLog, const N: usize> Scheduler<'a, S, L, N> {
    /// Drive every task output to off. Must run before the timer is armed.
    pub fn new(table: &'a DutyTable<N>, ticks: &'a TickState<N>, mut sink: S, mut log: L) -> Self {
        for &task in table.task_ids() {
            sink.set(task, false);
        }
        log.started(table.task_count(), table.cycle_len());
        Self {
            table,
            ticks,
            sink,
            log,
        }
    }

    /// Start the base tick. Global interrupts are still off at this point.
    pub fn arm<T: TickTimer>(&mut self, timer: &mut T, config: TimerConfig) {
        timer.start(config);
    }

    /// Toggle every task of `phase`'s entry, in declared order.
    pub fn dispatch(&mut self, phase: Phase) {
        let mut toggled = [TaskId(0); MAX_TASKS];
        let mut count = 0;
        let table = self.table;
        for task in table.tasks_at(phase) {
            self.sink.toggle(task);
            toggled[count] = task;
            count += 1;
        }
        self.log.dispatched(phase, &toggled[..count]);
    }

    /// One pass of the main loop.
    pub fn step(&mut self) -> LoopState {
        match self.ticks.pending_phase() {
            Some(phase) => {
                self.dispatch(phase);
                self.ticks.mark_work_done();
                LoopState::Dispatching(phase)
            }
            None => LoopState::Idle,
        }
    }

    /// Busy-poll forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn log(&self) -> &L {
        &self.log
    }
}
