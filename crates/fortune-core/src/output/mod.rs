//! Output Module
//!
//! Run statistics and report files.

pub mod report;
pub mod stats;

pub use report::*;
pub use stats::*;
