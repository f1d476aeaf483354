//! PetFriends API test suite
//!
//! This module exposes the client, scenarios and CLI internals so the
//! integration tests can drive them directly.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod models;
pub mod output;
pub mod photo;
pub mod scenario;
pub mod ua;
