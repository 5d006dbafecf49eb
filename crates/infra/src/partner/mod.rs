//! Partner API HTTP adapter

pub mod client;
pub mod errors;

pub use client::*;
pub use errors::describe_error_body;
