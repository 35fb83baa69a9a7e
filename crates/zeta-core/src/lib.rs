//! Zeta Core
//!
//! Shared building blocks for the Zeta editor crates: logging bootstrap,
//! configuration, profiling hooks, fast collections and the geometry types
//! carried as event payloads.

pub mod alloc;
pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;
