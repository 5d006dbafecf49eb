//! Partner API boundary

pub mod ports;

pub use ports::*;
