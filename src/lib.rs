//! Tick-phase LED scheduler for the ATmega328P.
//!
//! One TC1 compare interrupt advances a phase counter; the main loop looks
//! the phase up in a compile-time duty table and toggles the outputs it
//! names. Only the phase and a pending-work flag are shared between the two
//! contexts.
#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod drivers;
pub mod error;
pub mod hal;
pub mod logger;
pub mod rtos;
pub mod testing;

pub use error::ConfigError;
