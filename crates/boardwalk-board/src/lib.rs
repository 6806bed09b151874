//! Boardwalk: turn-based board traversal.
//!
//! A die produces a step count, a token advances that many cells around a
//! closed ring one animated hop at a time, and the cell it lands on resolves
//! to an effect. Everything advances through explicit `tick(elapsed)` calls
//! made by the owning scheduler.

pub mod application;
pub mod config;
pub mod domain;
pub mod layout;
