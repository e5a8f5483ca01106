//! Domain logic for the formgate form-builder platform.
//!
//! Everything in this crate is pure (no I/O, no database): the field
//! schema, form settings, the public-form renderer, the post-submit
//! delivery/gate flow machine, photo upload validation, and the
//! visitor-identity seam. Persistence lives in `formgate-db`, the HTTP
//! surface in `formgate-api`.

pub mod error;
pub mod field;
pub mod flow;
pub mod identity;
pub mod naming;
pub mod pagination;
pub mod render;
pub mod settings;
pub mod types;
pub mod upload;
