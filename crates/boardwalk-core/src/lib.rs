//! Shared engine abstractions for Boardwalk.
//!
//! This crate defines the traits and types the board crate and its hosts
//! depend on: time, randomness, errors, the event envelope and the observer
//! bus. It contains no game rules.

pub mod clock;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod observer;
pub mod rng;
pub mod source;
