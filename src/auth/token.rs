//! Token models produced by the token endpoint.

pub mod access;
pub mod secret;
