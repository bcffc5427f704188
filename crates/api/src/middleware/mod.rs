//! Request middleware: the JWT authentication extractor.

pub mod auth;
