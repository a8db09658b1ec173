//! Common types and traits for all aggregates

pub mod aggregate_root;
pub mod lifecycle;
pub mod record;
pub mod record_code;
pub mod status;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use lifecycle::{check_transition, Lifecycle, TransitionError, TransitionPolicy};
pub use record::{HasStatus, Searchable, StatusMut};
pub use record_code::next_code;
pub use status::{StatusChange, StatusEnum, StatusFilter, UnknownStatus};
