//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- the RS256 access-token signer.

pub mod jwt;
pub mod password;
