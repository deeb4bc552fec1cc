pub mod led_bank;
pub mod serial_console;

pub use led_bank::LedBank;
pub use serial_console::SerialConsole;
