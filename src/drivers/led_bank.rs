use crate::hal::OutputSink;
use crate::rtos::TaskId;
use embedded_hal::digital::v2::OutputPin;

/// One LED per task, task `TaskId(i)` on `pins[i]`.
///
/// The bank owns the on/off state and drives pins explicitly, so it works
/// with any `OutputPin`, including ones that cannot be read back.
pub struct LedBank<P, const K: usize> {
    pins: [P; K],
    state: [bool; K],
}

impl<P: OutputPin, const K: usize> LedBank<P, K> {
    /// Take the pins and switch every LED off.
    pub fn new(pins: [P; K]) -> Self {
        let mut bank = Self {
            pins,
            state: [false; K],
        };
        bank.set_all(false);
        bank
    }

    pub fn set_all(&mut self, on: bool) {
        for i in 0..K {
            self.drive(i, on);
        }
    }

    pub fn release(self) -> [P; K] {
        self.pins
    }

    fn drive(&mut self, index: usize, on: bool) {
        let pin = &mut self.pins[index];
        if on {
            pin.set_high().ok();
        } else {
            pin.set_low().ok();
        }
        self.state[index] = on;
    }
}

impl<P: OutputPin, const K: usize> OutputSink for LedBank<P, K> {
    fn toggle(&mut self, task: TaskId) {
        let index = task.0 as usize;
        if index < K {
            let on = !self.state[index];
            self.drive(index, on);
        }
    }

    fn set(&mut self, task: TaskId, on: bool) {
        let index = task.0 as usize;
        if index < K {
            self.drive(index, on);
        }
    }

    fn is_on(&self, task: TaskId) -> bool {
        self.state.get(task.0 as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    #[test]
    fn starts_dark_then_toggles() {
        let a = PinMock::new(&[
            Transaction::set(State::Low),
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ]);
        let b = PinMock::new(&[Transaction::set(State::Low), Transaction::set(State::High)]);

        let mut bank = LedBank::new([a, b]);
        assert!(!bank.is_on(TaskId(0)));

        bank.toggle(TaskId(0));
        bank.toggle(TaskId(1));
        assert!(bank.is_on(TaskId(0)));
        bank.toggle(TaskId(0));
        assert!(!bank.is_on(TaskId(0)));
        assert!(bank.is_on(TaskId(1)));

        for mut pin in bank.release() {
            pin.done();
        }
    }

    #[test]
    fn ignores_unknown_tasks() {
        let a = PinMock::new(&[Transaction::set(State::Low)]);
        let mut bank = LedBank::new([a]);
        bank.toggle(TaskId(5));
        bank.set(TaskId(5), true);
        assert!(!bank.is_on(TaskId(5)));
        for mut pin in bank.release() {
            pin.done();
        }
    }
}
