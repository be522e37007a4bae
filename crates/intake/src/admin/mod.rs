//! Admin dashboard: a read/write façade over the three entity services,
//! gated by a bearer-token allowlist injected from configuration.

pub mod router;

use std::sync::Arc;

use crate::careers::ApplicationService;
use crate::config::AdminConfig;
use crate::contact::ContactService;
use crate::waitlist::WaitlistService;

pub use router::admin_router;

/// Shared state for the admin routes: the three entity services plus the
/// token allowlist.
pub struct AdminState<CS, AS, WS, N> {
    pub contacts: Arc<ContactService<CS, N>>,
    pub applications: Arc<ApplicationService<AS, N>>,
    pub waitlist: Arc<WaitlistService<WS, N>>,
    pub tokens: AdminConfig,
}

impl<CS, AS, WS, N> Clone for AdminState<CS, AS, WS, N> {
    fn clone(&self) -> Self {
        Self {
            contacts: Arc::clone(&self.contacts),
            applications: Arc::clone(&self.applications),
            waitlist: Arc::clone(&self.waitlist),
            tokens: self.tokens.clone(),
        }
    }
}
