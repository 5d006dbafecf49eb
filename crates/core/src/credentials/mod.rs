//! Partner credential resolution

pub mod ports;
pub mod resolver;

pub use ports::*;
pub use resolver::*;
