//! Configuration errors
//!
//! Everything that can go wrong with the schedule is known before the first
//! tick. Validators are `const fn`s so the firmware rejects a bad
//! configuration at build time; nothing here is reported at runtime.

use ufmt::{uDebug, uWrite, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The task list is empty
    NoTasks,
    /// More tasks than a `TaskSet` can hold
    TooManyTasks,
    /// Two descriptors share an identifier
    DuplicateTask,
    /// A period of zero ticks or milliseconds
    ZeroPeriod,
    /// A period that is not a whole number of base ticks
    NotTickMultiple,
    /// A period longer than the schedule cycle
    PeriodExceedsCycle,
    /// Cycle length outside `1..=MAX_CYCLE`
    CycleLength,
    /// The timer period does not fit the 16-bit counter at any prescaler
    TimerRange,
    /// The timer period has no exact compare value at any prescaler
    TimerResolution,
}

impl ConfigError {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::NoTasks => "no tasks configured",
            ConfigError::TooManyTasks => "too many tasks",
            ConfigError::DuplicateTask => "duplicate task id",
            ConfigError::ZeroPeriod => "zero period",
            ConfigError::NotTickMultiple => "period is not a multiple of the base tick",
            ConfigError::PeriodExceedsCycle => "period exceeds the cycle length",
            ConfigError::CycleLength => "cycle length out of range",
            ConfigError::TimerRange => "timer period out of counter range",
            ConfigError::TimerResolution => "timer period not representable",
        }
    }
}

impl uDebug for ConfigError {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.as_str())
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
