//! Polled USART0 transmitter.
//!
//! No RX and no UDRE interrupt: TC1 stays the only interrupt source, so the
//! console can only be driven from main context.

use avr_device::atmega328p::USART0;
use core::convert::Infallible;
use embedded_hal::serial::Write;

const UDRE0: u8 = 1 << 5;
const TXEN0: u8 = 1 << 3;
// 8 data bits, no parity, 1 stop bit
const UCSZ_8N1: u8 = 0b0000_0110;

pub const fn ubrr(cpu_hz: u32, baud: u32) -> u16 {
    (cpu_hz / (16 * baud) - 1) as u16
}

pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0, cpu_hz: u32, baud: u32) -> Self {
        usart.ubrr0.write(|w| unsafe { w.bits(ubrr(cpu_hz, baud)) });
        usart.ucsr0c.write(|w| unsafe { w.bits(UCSZ_8N1) });
        usart.ucsr0b.write(|w| unsafe { w.bits(TXEN0) });
        Self { usart }
    }
}

impl Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        if self.usart.ucsr0a.read().bits() & UDRE0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.usart.udr0.write(|w| unsafe { w.bits(byte) });
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        if self.usart.ucsr0a.read().bits() & UDRE0 == 0 {
            return Err(nb::Error::WouldBlock);
        }
        Ok(())
    }
}
