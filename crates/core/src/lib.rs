//! Domain logic for the keygate authentication service.
//!
//! This crate has no I/O: it defines the error taxonomy shared across the
//! workspace, input validation for sign-in credentials, and refresh-token
//! value generation/hashing. Persistence and HTTP live in `keygate-db` and
//! `keygate-api`.

pub mod error;
pub mod hashing;
pub mod refresh_token;
pub mod types;
pub mod validate;
