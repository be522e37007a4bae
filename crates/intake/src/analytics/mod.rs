//! Analytics event intake. Events are validated and logged, never persisted.

pub mod router;

pub use router::analytics_router;
