//! Session state, demo mode, and the gate guarding the admin area.
//!
//! The session is an explicit object: callers construct one around an
//! [`AuthApi`] and a [`StateStore`], and components that care about
//! authorization take a [`SessionGate`] built from it. Change
//! notification is an explicit `watch` subscription, not global state.
//!
//! Demo mode is a client-side authorization bypass: anyone who can
//! write the local state file can grant themselves admin access without
//! the remote auth system ever being consulted. This mirrors the
//! deployed behaviour and is a known limitation, not an oversight.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use lightwave_store::{AuthApi, StoreError, UserIdentity};

/// Credentials that enable demo mode without any remote call.
pub const DEMO_EMAIL: &str = "admin@lightwave.com";
pub const DEMO_PASSWORD: &str = "demo123";

/// Synthetic identity reported while demo mode is active.
pub const DEMO_USER_ID: &str = "demo";

pub fn demo_identity() -> UserIdentity {
    UserIdentity {
        id: DEMO_USER_ID.to_string(),
        email: DEMO_EMAIL.to_string(),
    }
}

// ---------------------------------------------------------------------------
// StateStore
// ---------------------------------------------------------------------------

/// Failure persisting local state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("State file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    admin_demo_mode: bool,
    #[serde(default)]
    access_token: Option<String>,
}

/// Local key-value persistence: the demo-mode flag and the saved
/// session token, in one JSON file under a caller-supplied directory.
///
/// Reads are forgiving -- a missing or corrupt file behaves as the
/// default state, matching local-storage semantics.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: state_dir.into().join("lightwave_state.json"),
        }
    }

    fn load(&self) -> PersistedState {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => PersistedState::default(),
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(state)?)?;
        Ok(())
    }

    /// Whether the demo-mode bypass flag is set. No expiry.
    pub fn demo_mode(&self) -> bool {
        self.load().admin_demo_mode
    }

    pub fn set_demo_mode(&self, enabled: bool) -> Result<(), StateError> {
        let mut state = self.load();
        state.admin_demo_mode = enabled;
        self.save(&state)
    }

    /// The persisted remote session token, if a login survived from an
    /// earlier run.
    pub fn access_token(&self) -> Option<String> {
        self.load().access_token
    }

    pub fn set_access_token(&self, token: Option<String>) -> Result<(), StateError> {
        let mut state = self.load();
        state.access_token = token;
        self.save(&state)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Where the remote session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// The remote lookup has not resolved yet.
    Pending,
    SignedOut,
    SignedIn(UserIdentity),
}

/// Login failure, split so the login view can show the remote message
/// verbatim.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The remote call failed or rejected the credentials. Display is
    /// the server's own message, unchanged.
    #[error(transparent)]
    Remote(#[from] StoreError),

    #[error("Failed to persist login state: {0}")]
    State(#[from] StateError),
}

/// Explicit handle on the current session.
///
/// Starts [`SessionState::Pending`] until [`Session::bootstrap`]
/// resolves the persisted token against the remote endpoint. All state
/// transitions are published through the `watch` channel so gates can
/// react to revocation while the admin view is open.
pub struct Session {
    auth: Arc<dyn AuthApi>,
    state_store: Arc<StateStore>,
    tx: watch::Sender<SessionState>,
}

impl Session {
    pub fn new(auth: Arc<dyn AuthApi>, state_store: Arc<StateStore>) -> Self {
        let (tx, _rx) = watch::channel(SessionState::Pending);
        Self {
            auth,
            state_store,
            tx,
        }
    }

    /// Subscribe to session-state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Resolve the initial [`SessionState::Pending`] by checking the
    /// persisted token against the remote endpoint.
    ///
    /// Any remote failure resolves to signed-out rather than an error;
    /// the admin route then redirects to login, which is the safe side.
    pub async fn bootstrap(&self) {
        let next = match self.state_store.access_token() {
            None => SessionState::SignedOut,
            Some(token) => match self.auth.current_user(&token).await {
                Ok(Some(user)) => SessionState::SignedIn(user),
                Ok(None) => {
                    if let Err(e) = self.state_store.set_access_token(None) {
                        tracing::warn!(error = %e, "failed to clear stale session token");
                    }
                    SessionState::SignedOut
                }
                Err(e) => {
                    tracing::warn!(error = %e, "session lookup failed, treating as signed out");
                    SessionState::SignedOut
                }
            },
        };
        self.tx.send_replace(next);
    }

    /// Log in with email and password.
    ///
    /// The demo credential pair sets the local flag and never touches
    /// the network; anything else is verified remotely. A remote
    /// rejection surfaces the server's message verbatim.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity, LoginError> {
        if email == DEMO_EMAIL && password == DEMO_PASSWORD {
            self.state_store.set_demo_mode(true)?;
            let user = demo_identity();
            self.tx.send_replace(SessionState::SignedIn(user.clone()));
            return Ok(user);
        }

        let session = self.auth.sign_in(email, password).await?;
        self.state_store
            .set_access_token(Some(session.access_token))?;
        self.tx
            .send_replace(SessionState::SignedIn(session.user.clone()));
        Ok(session.user)
    }

    /// Log out: clear the demo flag, revoke the remote session, drop
    /// the persisted token. Remote failure is logged, not surfaced --
    /// the local session ends regardless.
    pub async fn sign_out(&self) -> Result<(), StateError> {
        self.state_store.set_demo_mode(false)?;

        if let Some(token) = self.state_store.access_token() {
            if let Err(e) = self.auth.sign_out(&token).await {
                tracing::warn!(error = %e, "remote sign-out failed");
            }
        }
        self.state_store.set_access_token(None)?;

        self.tx.send_replace(SessionState::SignedOut);
        Ok(())
    }

    /// Mark the session revoked (e.g. the store rejected the token
    /// mid-use). Subscribed gates observe the transition.
    pub fn revoke(&self) {
        self.tx.send_replace(SessionState::SignedOut);
    }
}

// ---------------------------------------------------------------------------
// SessionGate
// ---------------------------------------------------------------------------

/// Authorization decision for the admin area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    Authorized(UserIdentity),
    /// Redirect to the login view.
    Unauthorized,
    /// The remote lookup is still outstanding; render a loading
    /// indicator, neither protected content nor a redirect.
    Pending,
}

/// The check guarding the admin view.
///
/// The local demo flag short-circuits everything; otherwise the
/// decision follows the remote session state.
pub struct SessionGate {
    state_store: Arc<StateStore>,
    rx: watch::Receiver<SessionState>,
}

impl SessionGate {
    pub fn new(state_store: Arc<StateStore>, session: &Session) -> Self {
        Self {
            state_store,
            rx: session.subscribe(),
        }
    }

    /// Decide whether the caller may enter the admin area right now.
    pub fn evaluate(&self) -> GateState {
        if self.state_store.demo_mode() {
            return GateState::Authorized(demo_identity());
        }
        match &*self.rx.borrow() {
            SessionState::Pending => GateState::Pending,
            SessionState::SignedOut => GateState::Unauthorized,
            SessionState::SignedIn(user) => GateState::Authorized(user.clone()),
        }
    }

    /// Wait until the gate stops being authorized, so an open admin
    /// view can redirect when the session is revoked underneath it.
    ///
    /// Returns immediately if the gate is not currently authorized. A
    /// closed session channel counts as revocation.
    pub async fn revoked(&mut self) {
        loop {
            if !matches!(self.evaluate(), GateState::Authorized(_)) {
                return;
            }
            if self.rx.changed().await.is_err() {
                return;
            }
        }
    }
}
