//! Boardwalk simulation host: drives a [`GameSession`] from a Tokio interval
//! and logs every event it publishes.
//!
//! [`GameSession`]: boardwalk_board::application::session::GameSession

pub mod error;
pub mod runner;
pub mod settings;
