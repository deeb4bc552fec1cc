//! Configuration constants for the ATmega328P scheduler
//!
//! Everything here is evaluated at compile time; an invalid schedule or an
//! unreachable timer period fails the build.

use crate::hal::TimerConfig;
use crate::rtos::{cycle_length, DutyTable, TaskId, TaskPeriod};

/// CPU frequency in Hz, exported by `build.rs`
pub const CPU_FREQ_HZ: u32 = parse_hz(env!("MCU_FREQ_HZ"));

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// Base tick in milliseconds
pub const BASE_TICK_MS: u32 = 1000;

/// PORTB bits of the LEDs, in task order
pub const LED_PINS: [u8; 3] = [1, 2, 3];

pub const FIRST_LED: TaskId = TaskId(0);
pub const SECOND_LED: TaskId = TaskId(1);
pub const THIRD_LED: TaskId = TaskId(2);

/// Toggle periods of the three LEDs
pub const TASKS: [TaskPeriod; 3] = [
    task(FIRST_LED, 1000),
    task(SECOND_LED, 2000),
    task(THIRD_LED, 5000),
];

/// Schedule cycle length in base ticks
pub const CYCLE_TICKS: usize = match cycle_length(&TASKS) {
    Ok(n) => n,
    Err(_) => panic!("task periods have no usable common cycle"),
};

pub const SCHEDULE: DutyTable<CYCLE_TICKS> = match DutyTable::build(&TASKS) {
    Ok(table) => table,
    Err(_) => panic!("invalid task table"),
};

pub const TIMER: TimerConfig = match TimerConfig::from_period_ms(CPU_FREQ_HZ, BASE_TICK_MS) {
    Ok(cfg) => cfg,
    Err(_) => panic!("base tick not reachable with TC1"),
};

const fn task(id: TaskId, period_ms: u32) -> TaskPeriod {
    match TaskPeriod::from_millis(id, period_ms, BASE_TICK_MS) {
        Ok(t) => t,
        Err(_) => panic!("task period is not a whole number of base ticks"),
    }
}

const fn parse_hz(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut value = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_digit() {
            panic!("MCU_FREQ_HZ must be decimal");
        }
        value = value * 10 + (b - b'0') as u32;
        i += 1;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_schedule() {
        assert_eq!(CPU_FREQ_HZ, 16_000_000);
        assert_eq!(CYCLE_TICKS, 10);
        assert_eq!(SCHEDULE.tasks_at(0).count(), 3);
        assert_eq!(SCHEDULE.tasks_at(5).collect::<Vec<_>>(), vec![FIRST_LED, THIRD_LED]);
        assert_eq!(SCHEDULE.tasks_at(7).collect::<Vec<_>>(), vec![FIRST_LED]);
        assert_eq!(TIMER.period_us(CPU_FREQ_HZ), 1_000_000);
    }
}
