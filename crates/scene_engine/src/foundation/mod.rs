//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and the entity transform
//! - Handle-based collections for opaque resources
//! - Frame timing
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
