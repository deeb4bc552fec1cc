//! Scheduler event logging
//!
//! Events are reported from main context only, after the dispatch work for a
//! phase is done and outside any critical section.

use crate::rtos::{Phase, TaskId};
use ufmt::{uwrite, uWrite};

pub trait EventLog {
    fn started(&mut self, _tasks: usize, _cycle: usize) {}

    fn dispatched(&mut self, _phase: Phase, _toggled: &[TaskId]) {}
}

/// Silent log
impl EventLog for () {}

/// One line per event on a `ufmt` writer.
pub struct ConsoleLog<W> {
    out: W,
}

impl<W: uWrite> ConsoleLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: uWrite> EventLog for ConsoleLog<W> {
    fn started(&mut self, tasks: usize, cycle: usize) {
        uwrite!(self.out, "[SCH] {} tasks, cycle {} ticks\r\n", tasks, cycle).ok();
    }

    fn dispatched(&mut self, phase: Phase, toggled: &[TaskId]) {
        uwrite!(self.out, "[SCH] phase {}:", phase).ok();
        for task in toggled {
            uwrite!(self.out, " {}", task).ok();
        }
        self.out.write_str("\r\n").ok();
    }
}
