//! Session credential/role supply and change notification.

use tokio::sync::watch;

use crate::Role;

/// Bearer token handed out by the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

// Tokens never end up in logs.
impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// What the gate currently knows about the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub credential: Option<Credential>,
    pub role: Option<Role>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.role.as_ref().is_some_and(Role::is_admin)
    }
}

/// Supplies the current credential and role, and announces changes.
///
/// Components receive a gate explicitly instead of reading ambient storage.
pub trait SessionGate: Send + Sync {
    fn current_credential(&self) -> Option<Credential>;

    fn current_role(&self) -> Option<Role>;

    /// Receiver that is marked changed on every sign-in/sign-out.
    fn subscribe(&self) -> watch::Receiver<SessionState>;

    fn is_authenticated(&self) -> bool {
        self.current_credential().is_some()
    }

    fn is_admin(&self) -> bool {
        self.is_authenticated() && self.current_role().as_ref().is_some_and(Role::is_admin)
    }
}

/// Process-local gate backed by a `watch` channel.
#[derive(Debug)]
pub struct InMemorySession {
    tx: watch::Sender<SessionState>,
}

impl InMemorySession {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::default());
        Self { tx }
    }

    pub fn signed_in(credential: Credential, role: Option<Role>) -> Self {
        let session = Self::new();
        session.sign_in(credential, role);
        session
    }

    pub fn sign_in(&self, credential: Credential, role: Option<Role>) {
        tracing::info!(role = ?role, "session signed in");
        self.tx.send_replace(SessionState {
            credential: Some(credential),
            role,
        });
    }

    pub fn sign_out(&self) {
        tracing::info!("session signed out");
        self.tx.send_replace(SessionState::default());
    }

    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }
}

impl Default for InMemorySession {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionGate for InMemorySession {
    fn current_credential(&self) -> Option<Credential> {
        self.tx.borrow().credential.clone()
    }

    fn current_role(&self) -> Option<Role> {
        self.tx.borrow().role.clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}
