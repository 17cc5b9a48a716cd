// src/guard.rs
//! Route guard: protected commands run only with an active session.

use crate::error::{Error, Result};
use crate::session::{Session, SessionStore};

/// Pure, synchronous check. Callers send the user back to the entry flow
/// (login) on failure.
pub fn require_session(store: &SessionStore) -> Result<Session> {
    store.current().ok_or(Error::NoSession)
}
