use core::convert::Infallible;
use embedded_hal::serial::Write;

/// Line-oriented console over any blocking-capable serial transmitter.
///
/// Transmit errors are dropped: the console is diagnostics only and the
/// schedule must not depend on it.
pub struct SerialConsole<U> {
    uart: U,
}

impl<U: Write<u8>> SerialConsole<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    pub fn write_byte(&mut self, byte: u8) {
        nb::block!(self.uart.write(byte)).ok();
    }

    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }

    pub fn write_line(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    pub fn flush(&mut self) {
        nb::block!(self.uart.flush()).ok();
    }

    pub fn release(self) -> U {
        self.uart
    }
}

impl<U: Write<u8>> ufmt::uWrite for SerialConsole<U> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        SerialConsole::write_str(self, s);
        Ok(())
    }
}
