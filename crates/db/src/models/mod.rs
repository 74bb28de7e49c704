//! Database row structs and write DTOs.
//!
//! Rows are converted into the `roster_core` schema types at this edge; the
//! password hash never leaves this crate.

pub mod role;
pub mod user;
