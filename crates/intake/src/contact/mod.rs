//! Contact-form intake: domain record, service, and public router.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{Contact, ContactStats, ContactStatus};
pub use router::contact_router;
pub use service::{ContactService, ContactServiceError};
