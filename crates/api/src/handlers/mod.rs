//! HTTP request handlers, grouped by resource.

pub mod forms;
pub mod render;
pub mod submissions;
pub mod uploads;
