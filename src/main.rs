#![cfg_attr(target_arch = "avr", no_std, no_main, feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
use panic_halt as _;

use atmega328p_tick_scheduler::config::{self, CYCLE_TICKS};
use atmega328p_tick_scheduler::rtos::{DutyTable, Scheduler, TickState};

// Shared with TIMER1_COMPA; nothing else is visible to the interrupt
static TICKS: TickState<CYCLE_TICKS> = TickState::new();
static SCHEDULE: DutyTable<CYCLE_TICKS> = config::SCHEDULE;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use atmega328p_tick_scheduler::drivers::LedBank;
    use atmega328p_tick_scheduler::hal::{board, Tc1Timer};

    let dp = avr_device::atmega328p::Peripherals::take().unwrap();

    // Outputs first, in a defined (off) state
    let leds = LedBank::new(unsafe { board::leds() });
    let mut timer = Tc1Timer::new(dp.TC1);

    #[cfg(feature = "debug")]
    let log = {
        use atmega328p_tick_scheduler::drivers::SerialConsole;
        use atmega328p_tick_scheduler::hal::Uart;
        use atmega328p_tick_scheduler::logger::ConsoleLog;

        let mut console = SerialConsole::new(Uart::new(dp.USART0, config::CPU_FREQ_HZ, config::UART_BAUD));
        console.write_line("ATmega328P tick scheduler v0.1.0");
        ConsoleLog::new(console)
    };
    #[cfg(not(feature = "debug"))]
    let log = ();

    let mut scheduler = Scheduler::new(&SCHEDULE, &TICKS, leds, log);
    scheduler.arm(&mut timer, config::TIMER);

    // Enable interrupts globally, only once the table and outputs are ready
    unsafe { avr_device::interrupt::enable() };

    scheduler.run()
}

#[cfg(target_arch = "avr")]
#[avr_device::interrupt(atmega328p)]
fn TIMER1_COMPA() {
    TICKS.on_tick();
}

/// Host build: run two schedule cycles against a recording sink and print
/// the dispatch log.
#[cfg(not(target_arch = "avr"))]
fn main() {
    use atmega328p_tick_scheduler::logger::ConsoleLog;
    use atmega328p_tick_scheduler::testing::{ManualTimer, RecordingSink};
    use core::convert::Infallible;

    struct Stdout;

    impl ufmt::uWrite for Stdout {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            print!("{}", s);
            Ok(())
        }
    }

    let mut timer = ManualTimer::new();
    let mut scheduler = Scheduler::new(&SCHEDULE, &TICKS, RecordingSink::new(), ConsoleLog::new(Stdout));
    scheduler.arm(&mut timer, config::TIMER);

    for _ in 0..2 * CYCLE_TICKS {
        scheduler.step();
        timer.fire(&TICKS);
    }
    scheduler.step();
}
