//! PORTB pins as `embedded-hal` outputs.

use avr_device::atmega328p::PORTB;
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::OutputPin;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// PORTB pin, selected at runtime so pins can share one array type.
#[derive(Debug)]
pub struct Pin<MODE> {
    mask: u8,
    _mode: PhantomData<MODE>,
}

impl Pin<Input> {
    /// # Safety
    ///
    /// Only one handle per pin may exist, and `bit` must be below 8.
    pub const unsafe fn steal(bit: u8) -> Self {
        Pin {
            mask: 1 << bit,
            _mode: PhantomData,
        }
    }
}

impl<MODE: PinMode> Pin<MODE> {
    /// Drive the pin low, then set its DDRB bit.
    pub fn into_output(self) -> Pin<Output> {
        let mask = self.mask;
        avr_device::interrupt::free(|_| unsafe {
            let port = &*PORTB::ptr();
            port.portb.modify(|r, w| w.bits(r.bits() & !mask));
            port.ddrb.modify(|r, w| w.bits(r.bits() | mask));
        });
        Pin {
            mask,
            _mode: PhantomData,
        }
    }
}

impl OutputPin for Pin<Output> {
    type Error = Infallible;

    // read-modify-write of PORTB must not interleave with another writer
    fn set_high(&mut self) -> Result<(), Infallible> {
        let mask = self.mask;
        avr_device::interrupt::free(|_| unsafe {
            (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() | mask));
        });
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Infallible> {
        let mask = self.mask;
        avr_device::interrupt::free(|_| unsafe {
            (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() & !mask));
        });
        Ok(())
    }
}

pub mod board {
    use super::*;
    use crate::config::LED_PINS;

    /// LED outputs in task order.
    ///
    /// # Safety
    ///
    /// Call once; the pins must not be used elsewhere.
    pub unsafe fn leds() -> [Pin<Output>; 3] {
        LED_PINS.map(|bit| Pin::<Input>::steal(bit).into_output())
    }
}
