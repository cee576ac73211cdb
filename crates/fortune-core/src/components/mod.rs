//! ECS Components
//!
//! Per-individual state stored on entities.

pub mod individual;

pub use individual::*;
