//! Contracts for the systems the core talks to but does not implement.
//!
//! Every call here may block on I/O, so the core never invokes them itself:
//! the shell services [`crate::controller::Outbound`] requests with these
//! traits and reports the outcome back to the controller.

use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct IdentityId(String);

crate::impl_string_newtype!(IdentityId);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Handle(String);

crate::impl_string_newtype!(Handle);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct TrackUrl(String);

crate::impl_string_newtype!(TrackUrl);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub handle: Handle,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub handle: Handle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMeta {
    pub title: String,
    pub artist: String,
    pub art_src: Option<String>,
    pub canonical_url: TrackUrl,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Not signed in")]
    NotSignedIn,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Share failed: {0}")]
    Share(String),
}

pub type IdentityCallback = Box<dyn Fn(Option<Identity>) + Send + Sync>;

pub trait IdentityService: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;

    fn on_identity_change(&self, callback: IdentityCallback);

    fn sign_out(&self) -> Result<(), CollaboratorError>;
}

pub trait ProfileStore: Send + Sync {
    /// The viewer's published songs, in order, at most five.
    fn own_songs(&self, id: &IdentityId) -> Result<Vec<TrackUrl>, CollaboratorError>;

    fn friend_ids(&self, id: &IdentityId) -> Result<Vec<IdentityId>, CollaboratorError>;

    fn profile(&self, id: &IdentityId) -> Result<Profile, CollaboratorError>;

    /// Removes songs, friend edges in both directions and the profile. Either
    /// all of it is gone afterwards or none of it is.
    fn delete_account_data(&self, id: &IdentityId) -> Result<(), CollaboratorError>;
}

pub trait TrackResolver: Send + Sync {
    fn resolve_track(&self, url: &TrackUrl) -> Option<TrackMeta>;
}

pub trait Sharer {
    fn share(&self, payload: &str) -> Result<(), CollaboratorError>;
}

/// Tries `primary` and hands the payload to `fallback` when it fails or is
/// absent.
pub fn share_with_fallback(
    primary: Option<&dyn Sharer>,
    fallback: &dyn Sharer,
    payload: &str,
) -> Result<(), CollaboratorError> {
    if let Some(primary) = primary {
        match primary.share(payload) {
            Ok(()) => return Ok(()),
            Err(e) => log::warn!("Share failed, falling back: {}", e),
        }
    }
    fallback.share(payload)
}

pub trait Haptics {
    fn pulse(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self) {}
}

/// Synchronous yes/no gate in front of destructive requests.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recording {
        fail: bool,
        seen: RefCell<Vec<String>>,
    }

    impl Recording {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Sharer for Recording {
        fn share(&self, payload: &str) -> Result<(), CollaboratorError> {
            self.seen.borrow_mut().push(payload.to_string());
            if self.fail {
                Err(CollaboratorError::Share("unavailable".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_share_prefers_primary() {
        let primary = Recording::new(false);
        let fallback = Recording::new(false);
        share_with_fallback(Some(&primary), &fallback, "hi").unwrap();
        assert_eq!(primary.seen.borrow().len(), 1);
        assert!(fallback.seen.borrow().is_empty());
    }

    #[test]
    fn test_share_falls_back_on_failure_or_absence() {
        let primary = Recording::new(true);
        let fallback = Recording::new(false);
        share_with_fallback(Some(&primary), &fallback, "hi").unwrap();
        share_with_fallback(None, &fallback, "again").unwrap();
        assert_eq!(*fallback.seen.borrow(), vec!["hi", "again"]);
    }

    #[test]
    fn test_identity_id_is_transparent() {
        let id: IdentityId = serde_json::from_str("\"u-1\"").unwrap();
        assert_eq!(id, IdentityId::new("u-1"));
        assert_eq!(id.to_string(), "u-1");
    }
}
