use crate::error::ConfigError;

/// Upper bound on statically configured tasks, one bit each in a `TaskSet`
pub const MAX_TASKS: usize = 8;

/// Identifier of a periodic task, doubling as its output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskId(pub u8);

impl ufmt::uDisplay for TaskId {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        ufmt::uwrite!(f, "T{}", self.0)
    }
}

/// Task period descriptor: which task, and how many base ticks between its
/// actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskPeriod {
    pub id: TaskId,
    pub period_ticks: u16,
}

impl TaskPeriod {
    pub const fn new(id: TaskId, period_ticks: u16) -> Self {
        Self { id, period_ticks }
    }

    /// Descriptor from a wall-clock period. The period must be a whole
    /// number of base ticks.
    pub const fn from_millis(id: TaskId, period_ms: u32, tick_ms: u32) -> Result<Self, ConfigError> {
        if period_ms == 0 || tick_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        if period_ms % tick_ms != 0 {
            return Err(ConfigError::NotTickMultiple);
        }
        let ticks = period_ms / tick_ms;
        if ticks > u16::MAX as u32 {
            return Err(ConfigError::PeriodExceedsCycle);
        }
        Ok(Self::new(id, ticks as u16))
    }
}

/// Set of task slots, indexed by position in the declared task list.
///
/// Iteration yields slots in ascending order, which is the declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskSet(u8);

impl TaskSet {
    pub const EMPTY: TaskSet = TaskSet(0);

    #[inline]
    pub const fn with(self, slot: usize) -> Self {
        TaskSet(self.0 | (1 << slot))
    }

    #[inline]
    pub const fn contains(&self, slot: usize) -> bool {
        slot < MAX_TASKS && self.0 & (1 << slot) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub fn slots(&self) -> Slots {
        Slots { bits: self.0 }
    }
}

pub struct Slots {
    bits: u8,
}

impl Iterator for Slots {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            return None;
        }
        let slot = self.bits.trailing_zeros() as usize;
        // clear lowest set bit
        self.bits &= self.bits - 1;
        Some(slot)
    }
}
