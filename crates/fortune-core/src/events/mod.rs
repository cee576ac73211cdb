//! Event Field Logging

pub mod logger;

pub use logger::{read_field_log, FieldLogger};
