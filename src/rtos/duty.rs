//! Duty table: which tasks act at which phase of the schedule cycle.
//!
//! The table is derived once from the task descriptors. For a cycle of `N`
//! ticks, entry `p` holds every task whose period divides `p`, so entry 0
//! (the reset/sync tick) holds all of them.

use super::task::{TaskId, TaskPeriod, TaskSet, MAX_TASKS};
use super::Phase;
use crate::error::ConfigError;

/// Longest cycle a `u8` phase can address
pub const MAX_CYCLE: usize = 256;

pub struct DutyTable<const N: usize> {
    entries: [TaskSet; N],
    ids: [TaskId; MAX_TASKS],
    len: usize,
}

impl<const N: usize> DutyTable<N> {
    /// Build the table for a cycle of `N` ticks.
    ///
    /// Slots follow the declared order of `tasks`, which fixes the action
    /// order within an entry.
    pub const fn build(tasks: &[TaskPeriod]) -> Result<Self, ConfigError> {
        if N == 0 || N > MAX_CYCLE {
            return Err(ConfigError::CycleLength);
        }
        if let Err(e) = validate(tasks) {
            return Err(e);
        }

        let mut ids = [TaskId(0); MAX_TASKS];
        let mut slot = 0;
        while slot < tasks.len() {
            if tasks[slot].period_ticks as usize > N {
                return Err(ConfigError::PeriodExceedsCycle);
            }
            ids[slot] = tasks[slot].id;
            slot += 1;
        }

        let mut entries = [TaskSet::EMPTY; N];
        let mut phase = 0;
        while phase < N {
            let mut set = TaskSet::EMPTY;
            let mut slot = 0;
            while slot < tasks.len() {
                if phase % tasks[slot].period_ticks as usize == 0 {
                    set = set.with(slot);
                }
                slot += 1;
            }
            entries[phase] = set;
            phase += 1;
        }

        Ok(Self {
            entries,
            ids,
            len: tasks.len(),
        })
    }

    #[inline]
    pub const fn cycle_len(&self) -> usize {
        N
    }

    #[inline]
    pub const fn task_count(&self) -> usize {
        self.len
    }

    /// Task slots firing at `phase`; empty outside the cycle.
    #[inline]
    pub fn actions(&self, phase: Phase) -> TaskSet {
        match self.entries.get(phase as usize) {
            Some(set) => *set,
            None => TaskSet::EMPTY,
        }
    }

    /// Identifiers firing at `phase`, in declared order.
    pub fn tasks_at(&self, phase: Phase) -> impl Iterator<Item = TaskId> + '_ {
        self.actions(phase).slots().map(move |slot| self.ids[slot])
    }

    pub fn task_ids(&self) -> &[TaskId] {
        &self.ids[..self.len]
    }
}

const fn validate(tasks: &[TaskPeriod]) -> Result<(), ConfigError> {
    if tasks.is_empty() {
        return Err(ConfigError::NoTasks);
    }
    if tasks.len() > MAX_TASKS {
        return Err(ConfigError::TooManyTasks);
    }
    let mut i = 0;
    while i < tasks.len() {
        if tasks[i].period_ticks == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        let mut j = i + 1;
        while j < tasks.len() {
            if tasks[i].id.0 == tasks[j].id.0 {
                return Err(ConfigError::DuplicateTask);
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

const fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Least common multiple of all task periods: the shortest cycle after
/// which every task is back in phase.
pub const fn cycle_length(tasks: &[TaskPeriod]) -> Result<usize, ConfigError> {
    if let Err(e) = validate(tasks) {
        return Err(e);
    }
    let mut lcm = 1usize;
    let mut i = 0;
    while i < tasks.len() {
        let p = tasks[i].period_ticks as usize;
        lcm = lcm / gcd(lcm, p) * p;
        if lcm > MAX_CYCLE {
            return Err(ConfigError::CycleLength);
        }
        i += 1;
    }
    Ok(lcm)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: TaskId = TaskId(0);
    const B: TaskId = TaskId(1);
    const C: TaskId = TaskId(2);

    fn periods(p: [u16; 3]) -> [TaskPeriod; 3] {
        [
            TaskPeriod::new(A, p[0]),
            TaskPeriod::new(B, p[1]),
            TaskPeriod::new(C, p[2]),
        ]
    }

    #[test]
    fn entries_follow_divisibility() {
        let tasks = periods([2, 4, 10]);
        let table = DutyTable::<10>::build(&tasks).unwrap();
        for phase in 0..10u8 {
            let expected: Vec<TaskId> = tasks
                .iter()
                .filter(|t| phase as u16 % t.period_ticks == 0)
                .map(|t| t.id)
                .collect();
            let actual: Vec<TaskId> = table.tasks_at(phase).collect();
            assert_eq!(actual, expected, "phase {}", phase);
        }
    }

    #[test]
    fn phase_zero_fires_every_task() {
        let tasks = [TaskPeriod::new(TaskId(4), 3), TaskPeriod::new(TaskId(9), 7)];
        let table = DutyTable::<21>::build(&tasks).unwrap();
        assert_eq!(table.tasks_at(0).collect::<Vec<_>>(), vec![TaskId(4), TaskId(9)]);
    }

    #[test]
    fn declared_order_wins_over_id_order() {
        let tasks = [TaskPeriod::new(C, 1), TaskPeriod::new(A, 1)];
        let table = DutyTable::<2>::build(&tasks).unwrap();
        assert_eq!(table.tasks_at(1).collect::<Vec<_>>(), vec![C, A]);
    }

    #[test]
    fn out_of_cycle_phase_is_empty() {
        let table = DutyTable::<4>::build(&periods([1, 2, 4])).unwrap();
        assert!(table.actions(4).is_empty());
        assert!(table.actions(255).is_empty());
    }

    #[test]
    fn rejects_bad_configurations() {
        assert_eq!(DutyTable::<10>::build(&[]).err(), Some(ConfigError::NoTasks));
        assert_eq!(
            DutyTable::<10>::build(&periods([2, 0, 5])).err(),
            Some(ConfigError::ZeroPeriod)
        );
        assert_eq!(
            DutyTable::<10>::build(&[TaskPeriod::new(A, 2), TaskPeriod::new(A, 5)]).err(),
            Some(ConfigError::DuplicateTask)
        );
        assert_eq!(
            DutyTable::<10>::build(&periods([2, 4, 20])).err(),
            Some(ConfigError::PeriodExceedsCycle)
        );
        assert_eq!(
            DutyTable::<0>::build(&periods([1, 1, 1])).err(),
            Some(ConfigError::CycleLength)
        );
        let many: Vec<TaskPeriod> = (0..9).map(|i| TaskPeriod::new(TaskId(i), 1)).collect();
        assert_eq!(DutyTable::<1>::build(&many).err(), Some(ConfigError::TooManyTasks));
    }

    #[test]
    fn cycle_length_is_lcm() {
        assert_eq!(cycle_length(&periods([1, 2, 5])), Ok(10));
        assert_eq!(cycle_length(&periods([2, 4, 10])), Ok(20));
        assert_eq!(cycle_length(&periods([7, 11, 13])), Err(ConfigError::CycleLength));
    }

    #[test]
    fn builds_in_const_context() {
        const TABLE: DutyTable<6> = match DutyTable::build(&[TaskPeriod::new(A, 2), TaskPeriod::new(B, 3)]) {
            Ok(t) => t,
            Err(_) => panic!("bad schedule"),
        };
        assert_eq!(TABLE.actions(0).len(), 2);
        assert_eq!(TABLE.tasks_at(3).collect::<Vec<_>>(), vec![B]);
    }
}
