//! Authentication primitives: JWT generation and validation.

pub mod jwt;
