//! # Session Management
//!
//! Server-side session state keyed by an opaque cookie.
//!
//! ## Design
//! The cookie carries only a random session id; all state (cart,
//! logged-in user) lives server-side in the [`SessionStore`]. Each
//! session owns a typed [`shopfront_core::Cart`] rather than loose
//! key/value session entries, so cart semantics are enforced by the
//! type.
//!
//! Each session also carries a checkout gate: an async mutex held for
//! the duration of a checkout, so two concurrent checkout requests on
//! the same session serialize instead of racing to double-submit the
//! same cart.
//!
//! ## Locking
//! Cart and user are behind short-lived std mutexes (never held across
//! an await). The checkout gate is a tokio mutex because it spans the
//! database transaction.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use actix_web::cookie::Cookie;
use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{ready, Ready};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use shopfront_core::Cart;

/// Name of the session id cookie.
pub const SESSION_COOKIE: &str = "shopfront_sid";

/// Sessions idle longer than this are eligible for eviction.
pub const SESSION_MAX_IDLE: Duration = Duration::from_secs(60 * 60);

/// How often the background sweep runs.
pub const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

// =============================================================================
// Session
// =============================================================================

/// One client's server-side session state.
#[derive(Debug)]
pub struct Session {
    /// Opaque session id, also the cookie value.
    pub id: String,

    /// The session's shopping cart.
    cart: Mutex<Cart>,

    /// Logged-in user, if any. Checkout requires `Some`.
    user: Mutex<Option<String>>,

    /// Held for the duration of a checkout; serializes checkouts
    /// within one session.
    pub checkout_gate: tokio::sync::Mutex<()>,

    /// When the session last served a request; drives eviction.
    last_seen: Mutex<Instant>,
}

impl Session {
    fn new(id: String) -> Self {
        Session {
            id,
            cart: Mutex::new(Cart::new()),
            user: Mutex::new(None),
            checkout_gate: tokio::sync::Mutex::new(()),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    fn touch(&self) {
        *self
            .last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }

    /// Runs a closure with mutable access to the cart.
    pub fn with_cart_mut<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Returns a copy of the cart, for use across awaits.
    pub fn cart_snapshot(&self) -> Cart {
        self.cart
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Empties the cart. Called only after a committed checkout.
    pub fn clear_cart(&self) {
        self.with_cart_mut(Cart::clear);
    }

    /// Returns the logged-in user, if any.
    pub fn user(&self) -> Option<String> {
        self.user
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Marks the session as logged in.
    pub fn set_user(&self, username: impl Into<String>) {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = Some(username.into());
    }

    /// Logs the session out. The cart survives logout.
    pub fn clear_user(&self) {
        *self.user.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

// =============================================================================
// Session Store
// =============================================================================

/// In-memory session registry shared by all workers.
///
/// Growth is bounded by the idle sweep: `main` calls
/// [`SessionStore::evict_idle`] on a timer, so cookie-less crawlers
/// and abandoned carts age out instead of accumulating forever.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Arc<Session>>>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        SessionStore::default()
    }

    /// Looks up a session by cookie value, creating a fresh one when
    /// the id is absent or unknown (expired server restart, forged
    /// cookie). Returns the session and whether it was newly created.
    pub fn get_or_create(&self, id: Option<&str>) -> (Arc<Session>, bool) {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(session) = id.and_then(|id| sessions.get(id)) {
            session.touch();
            return (Arc::clone(session), false);
        }

        let id = Uuid::new_v4().to_string();
        debug!(session_id = %id, "Creating new session");
        let session = Arc::new(Session::new(id.clone()));
        sessions.insert(id, Arc::clone(&session));
        (session, true)
    }

    /// Drops sessions that have been idle for at least `max_idle`.
    ///
    /// Abandoned carts go with them; an evicted visitor simply gets a
    /// fresh session on their next request. In-flight requests are
    /// unaffected, they hold their own `Arc` to the session.
    ///
    /// Returns the number of sessions evicted.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let before = sessions.len();
        sessions.retain(|_, session| session.idle_for() < max_idle);
        let evicted = before - sessions.len();

        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }

    /// Number of live sessions (diagnostics and tests).
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// Extractor
// =============================================================================

/// Request extractor binding the caller to their session.
///
/// Reads the `shopfront_sid` cookie and resolves it against the
/// store; first-time callers get a fresh session and the handler's
/// response carries the Set-Cookie via [`ClientSession::respond`].
pub struct ClientSession {
    pub session: Arc<Session>,
    issued: bool,
}

impl ClientSession {
    /// Finalizes a response, attaching the session cookie if this
    /// request created the session.
    pub fn respond(&self, mut response: HttpResponse) -> HttpResponse {
        if self.issued {
            let cookie = Cookie::build(SESSION_COOKIE, self.session.id.clone())
                .path("/")
                .http_only(true)
                .finish();
            if let Err(err) = response.add_cookie(&cookie) {
                warn!(?err, "Failed to attach session cookie");
            }
        }
        response
    }
}

impl FromRequest for ClientSession {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(ApiError::internal("Application state not configured")));
        };

        let cookie = req.cookie(SESSION_COOKIE);
        let (session, issued) = state
            .sessions
            .get_or_create(cookie.as_ref().map(|c| c.value()));

        ready(Ok(ClientSession { session, issued }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_reuses_known_id() {
        let store = SessionStore::new();

        let (first, created) = store.get_or_create(None);
        assert!(created);

        let (second, created) = store.get_or_create(Some(&first.id));
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_id_gets_fresh_session() {
        let store = SessionStore::new();

        let (session, created) = store.get_or_create(Some("stale-or-forged"));
        assert!(created);
        assert_ne!(session.id, "stale-or-forged");
    }

    #[test]
    fn test_evict_idle_drops_stale_sessions() {
        let store = SessionStore::new();
        let (session, _) = store.get_or_create(None);
        session.with_cart_mut(|cart| {
            cart.set_item("prod-a", 2);
        });

        // A zero idle budget evicts everything not served this instant
        assert_eq!(store.evict_idle(Duration::ZERO), 1);
        assert!(store.is_empty());

        // The evicted id now resolves to a fresh session: no cart
        let (fresh, created) = store.get_or_create(Some(&session.id));
        assert!(created);
        assert!(fresh.cart_snapshot().is_empty());
    }

    #[test]
    fn test_evict_idle_keeps_active_sessions() {
        let store = SessionStore::new();
        let (session, _) = store.get_or_create(None);

        assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.len(), 1);

        // A cookie hit refreshes the idle clock
        let (_, created) = store.get_or_create(Some(&session.id));
        assert!(!created);
        assert!(session.idle_for() < Duration::from_secs(3600));
    }

    #[test]
    fn test_cart_and_user_state() {
        let store = SessionStore::new();
        let (session, _) = store.get_or_create(None);

        session.with_cart_mut(|cart| {
            cart.set_item("prod-a", 2);
        });
        assert_eq!(session.cart_snapshot().quantity("prod-a"), Some(2));

        assert_eq!(session.user(), None);
        session.set_user("alice");
        assert_eq!(session.user(), Some("alice".to_string()));

        // Logout keeps the cart
        session.clear_user();
        assert_eq!(session.user(), None);
        assert!(!session.cart_snapshot().is_empty());

        session.clear_cart();
        assert!(session.cart_snapshot().is_empty());
    }
}
