//! Application services: session tokens, credentials, file uploads.

pub mod auth;
pub mod token;
pub mod upload;

pub use token::TokenService;
