//! Client-side session state over the auth service.
//!
//! A [`SessionProvider`] holds the identity of one signed-in client and
//! broadcasts every transition between "signed out" and "signed in as X".
//! Consumers either pull events from a [`Subscription`] or register a
//! callback with [`SessionProvider::on_change`]. Every subscription carries a
//! [`Liveness`] flag; work started on behalf of a subscription must check it
//! before publishing results, so nothing lands after teardown.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::error::AuthError;
use crate::models::identity::Identity;
use crate::services::auth_service::AuthService;

const EVENT_BUFFER: usize = 16;

#[derive(Debug, Clone)]
struct ActiveSession {
    identity: Identity,
    token: String,
}

struct Shared {
    current: Mutex<Option<ActiveSession>>,
    events: broadcast::Sender<Option<Identity>>,
}

impl Shared {
    fn current_identity(&self) -> Option<Identity> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|s| s.identity.clone())
    }

    /// Swaps the session and emits an event only when the identity changed.
    fn publish(&self, next: Option<ActiveSession>) {
        let mut guard = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = guard.as_ref().map(|s| s.identity.clone());
        let after = next.as_ref().map(|s| s.identity.clone());
        *guard = next;
        if before != after {
            // No receivers is fine.
            let _ = self.events.send(after);
        }
    }
}

#[derive(Clone)]
pub struct SessionProvider {
    auth: AuthService,
    shared: Arc<Shared>,
}

impl SessionProvider {
    pub fn new(auth: AuthService) -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            auth,
            shared: Arc::new(Shared {
                current: Mutex::new(None),
                events,
            }),
        }
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.shared.current_identity()
    }

    pub fn token(&self) -> Option<String> {
        self.shared
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|s| s.token.clone())
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let signed_in = self.auth.sign_in(email, password).await?;
        let identity = signed_in.identity.clone();
        self.shared.publish(Some(ActiveSession {
            identity: signed_in.identity,
            token: signed_in.token,
        }));
        Ok(identity)
    }

    /// Resumes a session from a previously issued token. An invalid token
    /// resolves to "signed out" and the error is returned to the caller.
    pub async fn restore(&self, token: &str) -> Result<Identity, AuthError> {
        match self.auth.authenticate(token).await {
            Ok(identity) => {
                self.shared.publish(Some(ActiveSession {
                    identity: identity.clone(),
                    token: token.to_string(),
                }));
                Ok(identity)
            }
            Err(e) => {
                self.shared.publish(None);
                Err(e)
            }
        }
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        if let Some(identity) = self.current_identity() {
            self.auth.sign_out(&identity).await?;
        }
        self.shared.publish(None);
        Ok(())
    }

    pub fn subscribe(&self) -> Subscription {
        // Holding the lock while subscribing keeps the initial state and the
        // first broadcast event consistent.
        let guard = self
            .shared
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let rx = self.shared.events.subscribe();
        let initial = guard.as_ref().map(|s| s.identity.clone());
        drop(guard);

        Subscription {
            initial: Some(initial),
            last: None,
            rx,
            shared: Arc::downgrade(&self.shared),
            liveness: Liveness::new(),
        }
    }

    /// Runs `callback` once with the current state and then once per
    /// transition, until the returned handle is unsubscribed or dropped.
    /// Must be called from within a Tokio runtime.
    pub fn on_change<F, Fut>(&self, mut callback: F) -> SubscriptionHandle
    where
        F: FnMut(Option<Identity>, Liveness) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut subscription = self.subscribe();
        let liveness = subscription.liveness();
        let task = tokio::spawn(async move {
            while let Some(state) = subscription.next().await {
                callback(state, subscription.liveness()).await;
            }
        });
        SubscriptionHandle { liveness, task }
    }
}

#[derive(Debug, Clone)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn end(&self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct Subscription {
    initial: Option<Option<Identity>>,
    last: Option<Option<Identity>>,
    rx: broadcast::Receiver<Option<Identity>>,
    shared: Weak<Shared>,
    liveness: Liveness,
}

impl Subscription {
    /// Next auth state, or `None` once unsubscribed or the provider is gone.
    pub async fn next(&mut self) -> Option<Option<Identity>> {
        if !self.liveness.is_alive() {
            return None;
        }
        if let Some(initial) = self.initial.take() {
            self.last = Some(initial.clone());
            return Some(initial);
        }

        loop {
            let state = match self.rx.recv().await {
                Ok(state) => state,
                Err(RecvError::Lagged(_)) => self.shared.upgrade()?.current_identity(),
                Err(RecvError::Closed) => return None,
            };
            if !self.liveness.is_alive() {
                return None;
            }
            if self.last.as_ref() != Some(&state) {
                self.last = Some(state.clone());
                return Some(state);
            }
        }
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness.clone()
    }

    pub fn unsubscribe(&self) {
        self.liveness.end();
    }
}

/// Owner of an [`SessionProvider::on_change`] registration.
pub struct SubscriptionHandle {
    liveness: Liveness,
    task: JoinHandle<()>,
}

impl SubscriptionHandle {
    pub fn is_alive(&self) -> bool {
        self.liveness.is_alive()
    }

    pub fn unsubscribe(&self) {
        self.liveness.end();
        self.task.abort();
    }
}

impl Drop for SubscriptionHandle {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
