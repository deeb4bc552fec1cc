//! TC1 compare-match timer used as the base tick source.

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Prescaler {
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

impl Prescaler {
    pub const ALL: [Prescaler; 5] = [
        Prescaler::Direct,
        Prescaler::Div8,
        Prescaler::Div64,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }

    /// CS12:CS10 clock select bits
    pub const fn cs_bits(self) -> u8 {
        self as u8
    }
}

/// CTC settings for one interrupt every `period_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    pub prescaler: Prescaler,
    /// OCR1A value; the counter runs `compare + 1` steps per period
    pub compare: u16,
}

impl TimerConfig {
    /// Pick the smallest prescaler with an exact 16-bit compare value.
    pub const fn from_period_ms(cpu_hz: u32, period_ms: u32) -> Result<Self, ConfigError> {
        if period_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        let mut fits = false;
        let mut i = 0;
        while i < Prescaler::ALL.len() {
            let prescaler = Prescaler::ALL[i];
            let ticks_num = cpu_hz as u64 * period_ms as u64;
            let ticks_den = prescaler.divisor() as u64 * 1000;
            let counts = ticks_num / ticks_den;
            if counts >= 1 && counts <= u16::MAX as u64 + 1 {
                fits = true;
                if ticks_num % ticks_den == 0 {
                    return Ok(Self {
                        prescaler,
                        compare: (counts - 1) as u16,
                    });
                }
            }
            i += 1;
        }
        if fits {
            Err(ConfigError::TimerResolution)
        } else {
            Err(ConfigError::TimerRange)
        }
    }

    /// Actual period in microseconds for `cpu_hz`.
    pub const fn period_us(&self, cpu_hz: u32) -> u64 {
        (self.compare as u64 + 1) * self.prescaler.divisor() as u64 * 1_000_000 / cpu_hz as u64
    }
}

/// A periodic interrupt source producing base ticks.
pub trait TickTimer {
    /// Configure and start the timer with its compare interrupt unmasked.
    /// Global interrupts stay as they are.
    fn start(&mut self, config: TimerConfig);
}

#[cfg(target_arch = "avr")]
pub use self::avr::Tc1Timer;

#[cfg(target_arch = "avr")]
mod avr {
    use super::{TickTimer, TimerConfig};
    use avr_device::atmega328p::TC1;

    const WGM12: u8 = 1 << 3;
    const OCIE1A: u8 = 1 << 1;

    pub struct Tc1Timer {
        tc1: TC1,
    }

    impl Tc1Timer {
        pub fn new(tc1: TC1) -> Self {
            // Stop the counter until it is configured
            tc1.tccr1b.write(|w| unsafe { w.bits(0) });
            Self { tc1 }
        }
    }

    impl TickTimer for Tc1Timer {
        fn start(&mut self, config: TimerConfig) {
            avr_device::interrupt::free(|_| {
                self.tc1.tccr1a.write(|w| unsafe { w.bits(0) });
                self.tc1.tcnt1.write(|w| unsafe { w.bits(0) });
                self.tc1.ocr1a.write(|w| unsafe { w.bits(config.compare) });
                // CTC mode, clock select starts the counter
                self.tc1
                    .tccr1b
                    .write(|w| unsafe { w.bits(WGM12 | config.prescaler.cs_bits()) });
                self.tc1.timsk1.write(|w| unsafe { w.bits(OCIE1A) });
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F_CPU: u32 = 16_000_000;

    #[test]
    fn one_second_tick() {
        let cfg = TimerConfig::from_period_ms(F_CPU, 1000).unwrap();
        assert_eq!(cfg.prescaler, Prescaler::Div256);
        assert_eq!(cfg.compare, 62_499);
        assert_eq!(cfg.period_us(F_CPU), 1_000_000);
    }

    #[test]
    fn picks_smallest_exact_prescaler() {
        let cfg = TimerConfig::from_period_ms(F_CPU, 500).unwrap();
        assert_eq!(cfg.prescaler, Prescaler::Div256);
        assert_eq!(cfg.compare, 31_249);

        let cfg = TimerConfig::from_period_ms(F_CPU, 1).unwrap();
        assert_eq!(cfg.prescaler, Prescaler::Direct);
        assert_eq!(cfg.compare, 15_999);
    }

    #[test]
    fn rejects_unrepresentable_periods() {
        assert_eq!(TimerConfig::from_period_ms(F_CPU, 0), Err(ConfigError::ZeroPeriod));
        // 16 MHz / 1024 overflows 16 bits past ~4.19 s
        assert_eq!(TimerConfig::from_period_ms(F_CPU, 5000), Err(ConfigError::TimerRange));
        // odd clock leaves a remainder at every prescaler
        assert_eq!(
            TimerConfig::from_period_ms(1_000_003, 3),
            Err(ConfigError::TimerResolution)
        );
    }
}
