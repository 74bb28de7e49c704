//! Shared schema types for the roster user/role administration service.
//!
//! Everything that crosses the HTTP boundary in either direction lives here,
//! so the server and the client agree on one definition of each entity.

pub mod error;
pub mod role;
pub mod types;
pub mod user;
pub mod validation;
