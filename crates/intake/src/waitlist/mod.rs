//! Launch waitlist: signup domain, service, and router.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::WaitlistEntry;
pub use router::waitlist_router;
pub use service::{Signup, WaitlistService, WaitlistServiceError};
