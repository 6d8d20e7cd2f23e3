//! Controller layer: backend events and command dispatch.

pub mod events;
pub mod orchestration;
