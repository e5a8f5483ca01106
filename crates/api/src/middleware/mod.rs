//! Request extractors guarding the management surface.

pub mod auth;
