//! Session identity surface consumed by the remote backend.
//!
//! The sign-up/log-in/log-out flows themselves live in an external auth
//! collaborator; the task store only needs to know whether someone is signed
//! in and under which stable identifier their records are scoped.

use std::fmt::{Display, Formatter};
use std::sync::{Arc, RwLock};

/// Stable identifier of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Answers "is someone signed in, and as whom".
pub trait SessionProvider {
    /// Returns the active user, or `None` when signed out.
    fn current_user(&self) -> Option<UserId>;
}

impl<T: SessionProvider + ?Sized> SessionProvider for Arc<T> {
    fn current_user(&self) -> Option<UserId> {
        (**self).current_user()
    }
}

/// Shared session handle updated by the auth collaborator.
///
/// Auth-state changes (sign-in, sign-out) flow in through `sign_in` /
/// `sign_out`; the remote repository observes them through
/// [`SessionProvider::current_user`].
#[derive(Debug, Default)]
pub struct SessionState {
    user: RwLock<Option<UserId>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a sign-in under the given stable user identifier.
    pub fn sign_in(&self, user: UserId) {
        if let Ok(mut slot) = self.user.write() {
            *slot = Some(user);
        }
    }

    /// Clears the active session.
    pub fn sign_out(&self) {
        if let Ok(mut slot) = self.user.write() {
            *slot = None;
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user().is_some()
    }
}

impl SessionProvider for SessionState {
    fn current_user(&self) -> Option<UserId> {
        self.user.read().ok().and_then(|slot| slot.clone())
    }
}
