//! ECS Systems
//!
//! One iteration runs these in order: draw the event field, resolve each
//! individual's encounter, apply the property update, then tally outcomes.

pub mod encounter;
pub mod event_field;
pub mod property;

// Re-export commonly used systems
pub use encounter::{
    in_range, meets_any, resolve_encounter, resolve_encounters, ActiveModes, BaseResolution,
};
pub use event_field::{
    generate_event_field, sample_event_field, CurrentField, EventCounts, FieldSource,
};
pub use property::{apply_encounter, apply_property_updates};
