//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row plus the DTOs the repositories accept.

pub mod refresh_token;
pub mod user;
