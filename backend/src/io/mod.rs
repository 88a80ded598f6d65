//! # IO Module
//!
//! The interface layer between HTTP clients and the domain logic.
//!
//! Translates requests into domain commands, resolves the session cookie into
//! an authenticated user, and turns domain results and errors into JSON
//! responses with the right status codes.

pub mod rest;

pub use rest::*;
