//! Application layer: the session context object and its read-only views.

pub mod session;
pub mod views;
