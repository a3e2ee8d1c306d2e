//! State container: owns the session and the persistence port, and writes
//! the full snapshot after every transition that changed it.

use crate::counter::{Action, Session};
use crate::errors::AppError;
use crate::storage::{KeyValueStore, load_state, save_state};
use chrono::{DateTime, Local};
use tracing::{debug, info};

pub struct SessionStore<S> {
    session: Session,
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn open(storage: S) -> Self {
        let session = Session::from_persisted(load_state(&storage));
        Self { session, storage }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<&Session, AppError> {
        self.dispatch_at(action, Local::now()).await
    }

    pub async fn dispatch_at(
        &mut self,
        action: Action,
        now: DateTime<Local>,
    ) -> Result<&Session, AppError> {
        debug!(?action, "dispatching");
        let archived = matches!(action, Action::ConfirmReset { archive: true });
        let next = self.session.apply(action, now);
        let before = self.session.snapshot();
        let after = next.snapshot();

        if before != after {
            save_state(&mut self.storage, &after)?;
            if let Err(err) = self.storage.commit().await {
                // keep the staged keys in line with what is still on disk
                save_state(&mut self.storage, &before)?;
                return Err(err.into());
            }

            if archived && after.history.len() > before.history.len() {
                info!(count = before.count, target = %before.target, "archived session");
            } else if after.history.len() < before.history.len() {
                info!("deleted history item");
            }
        }

        self.session = next;
        Ok(&self.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{COUNT_KEY, HISTORY_KEY, MemoryStore, TARGET_KEY, THEME_KEY};
    use crate::themes::ThemeId;

    #[tokio::test]
    async fn every_state_change_rewrites_the_snapshot() {
        let mut store = SessionStore::open(MemoryStore::new());

        store.dispatch(Action::Increment).await.unwrap();
        store.dispatch(Action::Increment).await.unwrap();
        assert_eq!(store.storage().commits, 2);
        assert_eq!(store.storage().get(COUNT_KEY).as_deref(), Some("2"));
        assert_eq!(store.storage().get(TARGET_KEY).as_deref(), Some("100"));
        assert_eq!(store.storage().get(THEME_KEY).as_deref(), Some("gold"));
    }

    #[tokio::test]
    async fn view_only_actions_skip_storage() {
        let mut store = SessionStore::open(MemoryStore::new());
        store.dispatch(Action::OpenHistory).await.unwrap();
        store.dispatch(Action::OpenSettings).await.unwrap();
        store.dispatch(Action::RequestReset).await.unwrap();
        assert_eq!(store.storage().commits, 0);
        assert!(store.session().view.history_open);
    }

    #[tokio::test]
    async fn archive_is_persisted_and_reloaded() {
        let mut store = SessionStore::open(MemoryStore::new());
        for _ in 0..3 {
            store.dispatch(Action::Increment).await.unwrap();
        }
        store.dispatch(Action::RequestReset).await.unwrap();
        let session = store
            .dispatch(Action::ConfirmReset { archive: true })
            .await
            .unwrap();
        assert_eq!(session.count, 0);
        assert_eq!(session.history.len(), 1);
        assert!(store.storage().get(HISTORY_KEY).is_some());

        let reopened = SessionStore::open(store.storage().clone());
        assert_eq!(reopened.session().count, 0);
        assert_eq!(reopened.session().history.len(), 1);
        assert_eq!(reopened.session().history[0].count, 3);
    }

    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) {
            self.inner.set(key, value);
        }

        async fn commit(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            ))
        }
    }

    #[tokio::test]
    async fn failed_commit_leaves_session_and_keys_untouched() {
        let inner = MemoryStore::with_entries([(COUNT_KEY, "7")]);
        let mut store = SessionStore::open(ReadOnlyStore { inner });

        let err = store.dispatch(Action::Increment).await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.session().count, 7);
        assert_eq!(store.storage().get(COUNT_KEY).as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn corrupted_theme_loads_as_default() {
        let storage = MemoryStore::with_entries([(THEME_KEY, "neon"), (COUNT_KEY, "5")]);
        let store = SessionStore::open(storage);
        assert_eq!(store.session().theme, ThemeId::Gold);
        assert_eq!(store.session().count, 5);
    }
}
