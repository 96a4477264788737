//! `sweetshop-auth`: the Session Gate boundary.
//!
//! Credentials are issued elsewhere (an external identity provider). This
//! crate only carries the bearer token and role claim into the storefront and
//! tells it when they change.

pub mod roles;
pub mod session;

pub use roles::Role;
pub use session::{Credential, InMemorySession, SessionGate, SessionState};
