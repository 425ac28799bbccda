//! Physics module
//!
//! Only overlap detection is provided: entities resolve contacts themselves
//! (block a move, consume, merge). There is no collision response.

pub mod collision;

pub use collision::BoundingSphere;
