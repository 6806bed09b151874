//! Domain model: the ring, its effects, the die and the token movement.

pub mod dice;
pub mod effects;
pub mod events;
pub mod movement;
pub mod topology;
