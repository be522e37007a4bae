//! Careers intake: job application domain, service, and router.

pub mod domain;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{Application, ApplicationStats, ApplicationStatus, ApplicationStatusView, Position};
pub use router::careers_router;
pub use service::{ApplicationService, ApplicationServiceError};
