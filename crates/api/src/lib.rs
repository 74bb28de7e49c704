//! Roster API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! router construction) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod password;
pub mod router;
pub mod routes;
pub mod state;
