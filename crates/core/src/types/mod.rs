//! Domain types for Veranda entities.

pub mod email;
pub mod id;
pub mod role;
