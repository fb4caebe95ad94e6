//! Core types shared by every studio-bot crate.
//!
//! This crate holds the user identifier that keys conversational state and
//! the `Result` alias used for rootcause-based error reporting.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::UserId;
