// src/session/store.rs
//! Session store with a durable on-disk mirror.
//!
//! One writer path (login/merge/logout); readers observe changes through a
//! watch channel. The mirror file is read once at startup and rewritten on
//! every change.

use std::fs;
use std::path::PathBuf;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::types::ProfileUpdate;
use crate::error::{Error, Result};
use crate::session::model::Session;

pub struct SessionStore {
    path: PathBuf,
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    /// Initialize from the durable mirror. A missing file starts signed out;
    /// a corrupt one is discarded with a warning rather than failing startup.
    pub fn load(path: PathBuf) -> Self {
        let initial = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) => {
                    debug!("restored session for {}", session.email);
                    Some(session)
                }
                Err(e) => {
                    warn!("discarding unreadable session file {}: {e}", path.display());
                    None
                }
            },
            Err(_) => None,
        };
        let (tx, _) = watch::channel(initial);
        SessionStore { path, tx }
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Observe session changes. The receiver sees the value at subscription
    /// time plus every later write.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    pub fn login(&self, user_id: String, email: String) -> Result<Session> {
        let session = Session::new(user_id, email);
        self.persist(&session)?;
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    pub fn merge(&self, update: ProfileUpdate) -> Result<Session> {
        let mut session = self.current().ok_or(Error::NoSession)?;
        session.merge(update);
        self.persist(&session)?;
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        self.tx.send_replace(None);
        Ok(())
    }

    fn persist(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)
            .map_err(|e| Error::Decode(e.to_string()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::load(dir.path().join("session.json"))
    }

    #[test]
    fn missing_mirror_starts_signed_out() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn login_persists_and_reload_restores() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::load(path.clone());
        store.login("u1".into(), "ada@example.com".into()).unwrap();

        let reloaded = SessionStore::load(path);
        let session = reloaded.current().unwrap();
        assert_eq!(session.user_id, "u1");
        assert_eq!(session.email, "ada@example.com");
    }

    #[test]
    fn merge_updates_mirror() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::load(path.clone());
        store.login("u1".into(), "ada@example.com".into()).unwrap();
        store
            .merge(ProfileUpdate {
                full_name: Some("Ada".into()),
                ..Default::default()
            })
            .unwrap();

        let reloaded = SessionStore::load(path);
        assert_eq!(
            reloaded.current().unwrap().full_name.as_deref(),
            Some("Ada")
        );
    }

    #[test]
    fn merge_without_session_is_rejected() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(matches!(
            store.merge(ProfileUpdate::default()),
            Err(Error::NoSession)
        ));
    }

    #[test]
    fn logout_clears_state_and_mirror() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::load(path.clone());
        store.login("u1".into(), "ada@example.com".into()).unwrap();
        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_mirror_starts_signed_out() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = SessionStore::load(path);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn subscribers_observe_writes() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        let rx = store.subscribe();

        store.login("u1".into(), "ada@example.com".into()).unwrap();
        assert!(rx.borrow().is_some());

        store.logout().unwrap();
        assert!(rx.borrow().is_none());
    }
}
