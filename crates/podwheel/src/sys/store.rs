//! Local profile data and the session that goes with it.

use clickwheel::collab::{
    CollaboratorError, Identity, IdentityCallback, IdentityId, IdentityService, Profile,
    ProfileStore, TrackUrl,
};
use clickwheel::menu::MAX_SONGS;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed data file: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for CollaboratorError {
    fn from(e: StoreError) -> Self {
        CollaboratorError::Storage(e.to_string())
    }
}

/// On-disk layout of the data file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub profiles: BTreeMap<IdentityId, Profile>,
    #[serde(default)]
    pub songs: BTreeMap<IdentityId, Vec<TrackUrl>>,
    /// Directed edges: the key lists the values as friends.
    #[serde(default)]
    pub friends: BTreeMap<IdentityId, Vec<IdentityId>>,
    #[serde(default)]
    pub todays_playlist: Vec<TrackUrl>,
}

pub struct JsonStore {
    path: PathBuf,
    doc: Mutex<Document>,
}

impl JsonStore {
    /// Opens the data file at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let doc = if path.exists() {
            serde_json::from_str(&fs_err::read_to_string(&path)?)?
        } else {
            log::info!("No data file at {}, starting empty", path.display());
            Document::default()
        };
        Ok(Self {
            path,
            doc: Mutex::new(doc),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn todays_playlist(&self) -> Result<Vec<TrackUrl>, CollaboratorError> {
        Ok(self.doc.lock().todays_playlist.clone())
    }

    /// Records a profile for `identity` unless one exists already.
    pub fn ensure_profile(&self, identity: &Identity) -> Result<(), StoreError> {
        if self.doc.lock().profiles.contains_key(&identity.id) {
            return Ok(());
        }
        self.update(|doc| {
            doc.profiles.insert(
                identity.id.clone(),
                Profile {
                    display_name: identity.display_name.clone(),
                    handle: identity.handle.clone(),
                },
            );
        })
    }

    /// Applies `change` to a copy of the document and keeps it only once it
    /// is safely on disk.
    fn update(&self, change: impl FnOnce(&mut Document)) -> Result<(), StoreError> {
        let mut doc = self.doc.lock();
        let mut next = doc.clone();
        change(&mut next);
        self.persist(&next)?;
        *doc = next;
        Ok(())
    }

    fn persist(&self, doc: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs_err::write(&tmp, serde_json::to_vec_pretty(doc)?)?;
        fs_err::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl ProfileStore for JsonStore {
    fn own_songs(&self, id: &IdentityId) -> Result<Vec<TrackUrl>, CollaboratorError> {
        let doc = self.doc.lock();
        let mut songs = doc.songs.get(id).cloned().unwrap_or_default();
        songs.truncate(MAX_SONGS);
        Ok(songs)
    }

    fn friend_ids(&self, id: &IdentityId) -> Result<Vec<IdentityId>, CollaboratorError> {
        Ok(self.doc.lock().friends.get(id).cloned().unwrap_or_default())
    }

    fn profile(&self, id: &IdentityId) -> Result<Profile, CollaboratorError> {
        self.doc
            .lock()
            .profiles
            .get(id)
            .cloned()
            .ok_or_else(|| CollaboratorError::NotFound(format!("profile {}", id)))
    }

    fn delete_account_data(&self, id: &IdentityId) -> Result<(), CollaboratorError> {
        self.update(|doc| {
            doc.songs.remove(id);
            doc.profiles.remove(id);
            doc.friends.remove(id);
            for list in doc.friends.values_mut() {
                list.retain(|friend| friend != id);
            }
        })?;
        log::info!("Deleted account data for {}", id);
        Ok(())
    }
}

/// Session for the single account configured on this machine.
pub struct LocalIdentity {
    account: RwLock<Option<Identity>>,
    current: RwLock<Option<Identity>>,
    listeners: Mutex<Vec<IdentityCallback>>,
    store: Arc<JsonStore>,
}

impl LocalIdentity {
    pub fn new(account: Option<Identity>, remember: bool, store: Arc<JsonStore>) -> Self {
        let current = account.clone().filter(|_| remember);
        if let Some(identity) = &current
            && let Err(e) = store.ensure_profile(identity)
        {
            log::warn!("Failed to record profile for {}: {}", identity.handle, e);
        }
        Self {
            account: RwLock::new(account),
            current: RwLock::new(current),
            listeners: Mutex::new(Vec::new()),
            store,
        }
    }

    pub fn sign_in(&self) -> Result<Identity, CollaboratorError> {
        let identity = self
            .account
            .read()
            .clone()
            .ok_or_else(|| CollaboratorError::NotFound("an account handle in the config".into()))?;
        self.store.ensure_profile(&identity)?;
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    /// Swaps the configured account. A session for a different account ends.
    pub fn set_account(&self, account: Option<Identity>) {
        let stale = {
            let current = self.current.read();
            current.is_some() && current.as_ref() != account.as_ref()
        };
        *self.account.write() = account;
        if stale {
            log::info!("Configured account changed, signing out");
            self.set_current(None);
        }
    }

    fn set_current(&self, identity: Option<Identity>) {
        *self.current.write() = identity.clone();
        for listener in self.listeners.lock().iter() {
            listener(identity.clone());
        }
    }
}

impl IdentityService for LocalIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.current.read().clone()
    }

    fn on_identity_change(&self, callback: IdentityCallback) {
        self.listeners.lock().push(callback);
    }

    fn sign_out(&self) -> Result<(), CollaboratorError> {
        self.set_current(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickwheel::collab::Handle;
    use tempfile::TempDir;

    /// A data file path whose parent directory does not exist yet.
    fn scratch() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("podwheel").join("profiles.json");
        (dir, path)
    }

    fn id(s: &str) -> IdentityId {
        IdentityId::new(s)
    }

    fn identity(s: &str) -> Identity {
        Identity {
            id: id(s),
            handle: Handle::new(s),
            display_name: s.to_uppercase(),
        }
    }

    fn seeded() -> (TempDir, JsonStore) {
        let (dir, path) = scratch();
        let store = JsonStore::open(path).unwrap();
        store
            .update(|doc| {
                for who in ["me", "a", "b"] {
                    doc.profiles.insert(
                        id(who),
                        Profile {
                            display_name: who.to_uppercase(),
                            handle: Handle::new(who),
                        },
                    );
                }
                doc.songs.insert(
                    id("me"),
                    (0..7).map(|i| TrackUrl::new(format!("https://t/{i}"))).collect(),
                );
                doc.friends.insert(id("me"), vec![id("a"), id("b")]);
                doc.friends.insert(id("a"), vec![id("me")]);
                doc.friends.insert(id("b"), vec![id("a"), id("me")]);
                doc.todays_playlist = vec![TrackUrl::new("https://t/today")];
            })
            .unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let (_dir, path) = scratch();
        let store = JsonStore::open(path).unwrap();
        assert!(store.own_songs(&id("me")).unwrap().is_empty());
        assert!(store.friend_ids(&id("me")).unwrap().is_empty());
        assert!(matches!(
            store.profile(&id("me")),
            Err(CollaboratorError::NotFound(_))
        ));
    }

    #[test]
    fn test_songs_are_capped_and_data_survives_reopen() {
        let (_dir, store) = seeded();
        assert_eq!(store.own_songs(&id("me")).unwrap().len(), MAX_SONGS);

        let reopened = JsonStore::open(store.path()).unwrap();
        assert_eq!(reopened.friend_ids(&id("me")).unwrap(), vec![id("a"), id("b")]);
        assert_eq!(reopened.profile(&id("a")).unwrap().display_name, "A");
        assert_eq!(reopened.todays_playlist().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_removes_both_edge_directions() {
        let (_dir, store) = seeded();
        store.delete_account_data(&id("me")).unwrap();

        assert!(store.own_songs(&id("me")).unwrap().is_empty());
        assert!(store.friend_ids(&id("me")).unwrap().is_empty());
        assert!(store.profile(&id("me")).is_err());
        assert!(store.friend_ids(&id("a")).unwrap().is_empty());
        assert_eq!(store.friend_ids(&id("b")).unwrap(), vec![id("a")]);

        let reopened = JsonStore::open(store.path()).unwrap();
        assert!(reopened.profile(&id("me")).is_err());
        assert_eq!(reopened.todays_playlist().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let (_dir, base) = scratch();
        let blocker = base.parent().unwrap();
        fs_err::write(blocker, b"not a directory").unwrap();

        let store = JsonStore::open(&base).unwrap();
        assert!(store.ensure_profile(&identity("me")).is_err());
        assert!(store.profile(&id("me")).is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let (_dir, path) = scratch();
        fs_err::create_dir_all(path.parent().unwrap()).unwrap();
        fs_err::write(&path, b"{ nope").unwrap();
        assert!(matches!(JsonStore::open(&path), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_sign_in_records_profile_and_notifies() {
        let (_dir, path) = scratch();
        let store = Arc::new(JsonStore::open(path).unwrap());
        let session = LocalIdentity::new(Some(identity("me")), false, store.clone());
        assert_eq!(session.current_identity(), None);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session.on_identity_change(Box::new(move |who| sink.lock().push(who)));

        session.sign_in().unwrap();
        assert_eq!(store.profile(&id("me")).unwrap().display_name, "ME");
        session.sign_out().unwrap();
        assert_eq!(*seen.lock(), vec![Some(identity("me")), None]);
    }

    #[test]
    fn test_sign_in_needs_an_account() {
        let (_dir, path) = scratch();
        let store = Arc::new(JsonStore::open(path).unwrap());
        let session = LocalIdentity::new(None, true, store);
        assert!(matches!(session.sign_in(), Err(CollaboratorError::NotFound(_))));
        assert_eq!(session.current_identity(), None);
    }

    #[test]
    fn test_changing_account_ends_session() {
        let (_dir, path) = scratch();
        let store = Arc::new(JsonStore::open(path).unwrap());
        let session = LocalIdentity::new(Some(identity("me")), true, store);
        assert_eq!(session.current_identity(), Some(identity("me")));

        session.set_account(Some(identity("me")));
        assert!(session.current_identity().is_some());
        session.set_account(Some(identity("other")));
        assert_eq!(session.current_identity(), None);
    }
}
