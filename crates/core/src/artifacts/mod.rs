//! Deployment template publishing

pub mod ports;
pub mod publisher;

pub use ports::*;
pub use publisher::*;
