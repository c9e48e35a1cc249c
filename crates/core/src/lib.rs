//! Shared domain types for Veranda.
//!
//! This crate holds the types that cross crate boundaries: type-safe entity
//! IDs, the validated [`Email`] type, and the [`Role`] hierarchy used by the
//! authorization gate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::email::{Email, EmailError};
pub use types::id::{
    ColorConfigId, ContactId, FeatureId, PostId, ReasonId, SiteInfoId, SlideId, UserId,
};
pub use types::role::{Role, RoleParseError};
