//! Tick counter and pending-work flag shared between the timer interrupt and
//! the main loop.

use core::cell::Cell;
use critical_section::Mutex;

use super::Phase;

/// State shared between the tick interrupt (producer) and the main loop
/// (consumer).
///
/// Both variables are only touched inside a critical section, so the main
/// loop never sees a phase without the flag that belongs to it. A tick that
/// lands before the previous one was marked done simply overwrites it.
pub struct TickState<const N: usize> {
    phase: Mutex<Cell<Phase>>,
    done: Mutex<Cell<bool>>,
}

impl<const N: usize> TickState<N> {
    /// Start at phase 0 with its work still owed, so the sync tick is
    /// dispatched before the first timer match.
    pub const fn new() -> Self {
        Self {
            phase: Mutex::new(Cell::new(0)),
            done: Mutex::new(Cell::new(false)),
        }
    }

    /// Advance one tick. Interrupt context only.
    #[inline]
    pub fn on_tick(&self) {
        critical_section::with(|cs| {
            let phase = self.phase.borrow(cs);
            let next = phase.get() as usize + 1;
            phase.set(if next >= N { 0 } else { next as Phase });
            self.done.borrow(cs).set(false);
        });
    }

    #[inline]
    pub fn is_work_pending(&self) -> bool {
        critical_section::with(|cs| !self.done.borrow(cs).get())
    }

    #[inline]
    pub fn mark_work_done(&self) {
        critical_section::with(|cs| self.done.borrow(cs).set(true));
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        critical_section::with(|cs| self.phase.borrow(cs).get())
    }

    /// Phase owed to the main loop, read together with the flag.
    #[inline]
    pub fn pending_phase(&self) -> Option<Phase> {
        critical_section::with(|cs| {
            if self.done.borrow(cs).get() {
                None
            } else {
                Some(self.phase.borrow(cs).get())
            }
        })
    }
}

impl<const N: usize> Default for TickState<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_sync_tick_owed() {
        let ticks = TickState::<10>::new();
        assert_eq!(ticks.pending_phase(), Some(0));
        ticks.mark_work_done();
        assert!(!ticks.is_work_pending());
        assert_eq!(ticks.pending_phase(), None);
    }

    #[test]
    fn phase_wraps_after_cycle() {
        let ticks = TickState::<10>::new();
        let mut seen = Vec::new();
        for _ in 0..25 {
            ticks.on_tick();
            seen.push(ticks.phase());
        }
        let expected: Vec<Phase> = (1..=25).map(|i| (i % 10) as Phase).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn tick_clears_done_flag() {
        let ticks = TickState::<3>::new();
        ticks.mark_work_done();
        ticks.on_tick();
        assert!(ticks.is_work_pending());
        assert_eq!(ticks.pending_phase(), Some(1));
    }

    #[test]
    fn full_width_cycle_wraps() {
        let ticks = TickState::<256>::new();
        for _ in 0..255 {
            ticks.on_tick();
        }
        assert_eq!(ticks.phase(), 255);
        ticks.on_tick();
        assert_eq!(ticks.phase(), 0);
    }

    #[test]
    fn coalesces_unserviced_ticks() {
        let ticks = TickState::<10>::new();
        ticks.mark_work_done();
        ticks.on_tick();
        ticks.on_tick();
        // only the latest phase is owed
        assert_eq!(ticks.pending_phase(), Some(2));
        ticks.mark_work_done();
        assert_eq!(ticks.pending_phase(), None);
    }
}
