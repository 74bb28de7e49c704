//! Client side of roster: a typed gateway over the HTTP API and the
//! toolkit-agnostic view state that an admin console renders.
//!
//! All data access goes through [`gateway::DataGateway`]; the panels in
//! [`view`] only mirror server state after a successful call.

pub mod config;
pub mod error;
pub mod gateway;
pub mod view;

pub use config::ClientConfig;
pub use error::GatewayError;
pub use gateway::{DataGateway, HttpGateway};
