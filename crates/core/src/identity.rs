//! Active account identity.
//!
//! The decision store never reads global state; it asks an [`IdentityProvider`]
//! for the current account on every call.

use std::cell::RefCell;
use std::rc::Rc;

use crate::namespace::NamespaceKey;

/// Credentials for one server account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
  pub server_url: String,
  pub api_key: String,
  pub user: String,
}

impl Identity {
  pub fn new(server_url: impl Into<String>, api_key: impl Into<String>, user: impl Into<String>) -> Self {
    Self {
      server_url: server_url.into(),
      api_key: api_key.into(),
      user: user.into(),
    }
  }

  /// True once a server has been configured.
  pub fn is_configured(&self) -> bool {
    !self.server_url.trim().is_empty()
  }

  pub fn namespace(&self) -> NamespaceKey {
    NamespaceKey::derive(&self.server_url, &self.user)
  }
}

/// Source of the currently active identity.
pub trait IdentityProvider {
  fn identity(&self) -> Identity;
}

impl IdentityProvider for Identity {
  fn identity(&self) -> Identity {
    self.clone()
  }
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
  fn identity(&self) -> Identity {
    (**self).identity()
  }
}

/// Shared, single-threaded login session.
///
/// Clones observe the same identity, so a session handed to a
/// [`ReviewedStore`](crate::ReviewedStore) follows later `set_config` calls.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
  inner: Rc<RefCell<Identity>>,
}

impl AuthSession {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the active account.
  pub fn set_config(&self, server_url: impl Into<String>, api_key: impl Into<String>, user: impl Into<String>) {
    *self.inner.borrow_mut() = Identity::new(server_url, api_key, user);
  }

  /// Log out.
  pub fn clear(&self) {
    *self.inner.borrow_mut() = Identity::default();
  }

  pub fn is_configured(&self) -> bool {
    self.inner.borrow().is_configured()
  }
}

impl IdentityProvider for AuthSession {
  fn identity(&self) -> Identity {
    self.inner.borrow().clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn api_key_does_not_affect_namespace() {
    let a = Identity::new("http://server-a", "key-1", "Alice");
    let b = Identity::new("http://server-a", "key-2", "Alice");
    assert_eq!(a.namespace(), b.namespace());
  }

  #[test]
  fn session_clones_share_state() {
    let session = AuthSession::new();
    let observer = session.clone();
    assert!(!observer.is_configured());

    session.set_config("http://server-a", "key-a", "Alice");
    assert_eq!(observer.identity(), Identity::new("http://server-a", "key-a", "Alice"));

    session.clear();
    assert_eq!(observer.identity(), Identity::default());
  }

  #[test]
  fn blank_server_is_not_configured() {
    assert!(!Identity::new("   ", "key", "Alice").is_configured());
    assert!(Identity::new("http://server-a", "", "").is_configured());
  }
}
