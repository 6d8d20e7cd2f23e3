//! Background worker that owns the async runtime and the network clients.

pub mod commands;
pub mod runtime;
