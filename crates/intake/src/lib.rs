//! Core library for the marketing-site intake service.
//!
//! Each feature module follows a domain / service / router split. Persistence
//! goes through the [`store::RecordStore`] abstraction so every service runs
//! unchanged against the durable SQLite backend or the in-memory fallback.

pub mod admin;
pub mod analytics;
pub mod careers;
pub mod config;
pub mod contact;
pub mod error;
pub mod notify;
pub mod store;
pub mod telemetry;
pub mod waitlist;

mod ids;
mod validate;
