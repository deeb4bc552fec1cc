//! Tick-phase scheduler core: task descriptors, duty table, the state shared
//! with the tick interrupt, and the main dispatch loop.

pub mod duty;
pub mod scheduler;
pub mod task;
pub mod tick;

/// Position within the repeating schedule cycle
pub type Phase = u8;

pub use duty::{cycle_length, DutyTable, MAX_CYCLE};
pub use scheduler::{LoopState, Scheduler};
pub use task::{TaskId, TaskPeriod, TaskSet, MAX_TASKS};
pub use tick::TickState;
