pub mod timer;

#[cfg(target_arch = "avr")]
pub mod gpio;
#[cfg(target_arch = "avr")]
pub mod uart;

// Re-export commonly used types
pub use timer::{Prescaler, TickTimer, TimerConfig};

#[cfg(target_arch = "avr")]
pub use gpio::{board, Input, Output, Pin};
#[cfg(target_arch = "avr")]
pub use timer::Tc1Timer;
#[cfg(target_arch = "avr")]
pub use uart::Uart;

use crate::rtos::TaskId;

/// Capability to drive one digital output per task.
///
/// Operations are infallible at this level; whatever the pins report is
/// the board driver's concern.
pub trait OutputSink {
    /// Flip the output of `task`.
    fn toggle(&mut self, task: TaskId);

    /// Force the output of `task`. Used to reach a defined state at startup.
    fn set(&mut self, task: TaskId, on: bool);

    fn is_on(&self, task: TaskId) -> bool;
}
