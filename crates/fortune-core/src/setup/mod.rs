//! Population Setup
//!
//! Random draws and individual spawning.

pub mod population;
pub mod sampling;

pub use population::*;
pub use sampling::*;
