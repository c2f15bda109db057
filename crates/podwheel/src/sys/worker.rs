//! Services [`Outbound`] work off the UI thread and reports back as events.

use crate::config::{Config, ConfigError};
use crate::events::AppEvent;
use crate::sys::open;
use crate::sys::resolver::OEmbedResolver;
use crate::sys::share::{self, CommandSharer};
use crate::sys::store::{JsonStore, LocalIdentity, StoreError};
use async_channel::{Receiver, Sender};
use clickwheel::catalog::{Friend, Loaded};
use clickwheel::collab::{
    CollaboratorError, IdentityService, ProfileStore, Sharer, TrackResolver, TrackUrl,
    share_with_fallback,
};
use clickwheel::controller::{Job, LoadKind, Outbound};
use clickwheel::dispatch::Request;
use parking_lot::RwLock;
use std::cell::RefCell;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Failed to open data file: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Done(Result<(), CollaboratorError>),
    /// The share command was missing or failed; the window puts this
    /// message on the clipboard instead.
    Clipboard(String),
}

/// Keeps the payload for the window instead of sharing it.
#[derive(Default)]
struct Handoff(RefCell<Option<String>>);

impl Sharer for Handoff {
    fn share(&self, payload: &str) -> Result<(), CollaboratorError> {
        *self.0.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

pub struct Services {
    pub identity: Arc<LocalIdentity>,
    pub store: Arc<JsonStore>,
    pub resolver: Arc<dyn TrackResolver>,
    pub config: RwLock<Config>,
}

impl Services {
    pub fn open(config: &Config) -> Result<Self, ServicesError> {
        let store = Arc::new(JsonStore::open(config.data_file()?)?);
        let identity = Arc::new(LocalIdentity::new(
            config.account.identity(),
            config.account.remember,
            store.clone(),
        ));
        Ok(Self {
            identity,
            store,
            resolver: Arc::new(OEmbedResolver::new(config.oembed_endpoint.clone())),
            config: RwLock::new(config.clone()),
        })
    }

    pub fn reconfigure(&self, config: &Config) {
        self.identity.set_account(config.account.identity());
        *self.config.write() = config.clone();
    }

    pub fn load(&self, kind: &LoadKind) -> Result<Loaded, CollaboratorError> {
        match kind {
            LoadKind::OwnSongs(id) => Ok(Loaded::OwnSongs(self.store.own_songs(id)?)),
            LoadKind::FriendSongs(id) => {
                Ok(Loaded::FriendSongs(id.clone(), self.store.own_songs(id)?))
            }
            LoadKind::Friends(id) => {
                let mut friends = Vec::new();
                for friend_id in self.store.friend_ids(id)? {
                    match self.store.profile(&friend_id) {
                        Ok(profile) => friends.push(Friend {
                            id: friend_id,
                            display_name: profile.display_name,
                            handle: profile.handle,
                        }),
                        Err(e) => log::warn!("Skipping friend {}: {}", friend_id, e),
                    }
                }
                Ok(Loaded::Friends(friends))
            }
            LoadKind::TodaysPlaylist => Ok(Loaded::TodaysPlaylist(self.store.todays_playlist()?)),
        }
    }

    pub fn run(&self, job: &Job) -> Outcome {
        let result = match &job.request {
            Request::SignIn => self.identity.sign_in().map(|_| ()),
            Request::SignOut => self.identity.sign_out(),
            Request::DeleteAccount => self.delete_account(job),
            Request::Navigate(destination) => {
                let target = open::target(destination, &self.config.read(), self.store.path());
                open::open(&target)
            }
            Request::ShareProfile => return self.share(job),
        };
        Outcome::Done(result)
    }

    fn delete_account(&self, job: &Job) -> Result<(), CollaboratorError> {
        let who = job.identity.as_ref().ok_or(CollaboratorError::NotSignedIn)?;
        self.store.delete_account_data(&who.id)?;
        self.identity.sign_out()
    }

    fn share(&self, job: &Job) -> Outcome {
        let Some(identity) = &job.identity else {
            return Outcome::Done(Err(CollaboratorError::NotSignedIn));
        };
        let (message, command) = {
            let config = self.config.read();
            let message = share::profile_message(
                &identity.display_name,
                &config.profile_url(&identity.handle),
            );
            (message, config.share_command.clone())
        };

        let primary = command.as_deref().and_then(|command| {
            CommandSharer::parse(command)
                .inspect_err(|e| log::warn!("Ignoring share_command: {}", e))
                .ok()
        });
        let handoff = Handoff::default();
        if let Err(e) = share_with_fallback(
            primary.as_ref().map(|p| p as &dyn Sharer),
            &handoff,
            &message,
        ) {
            return Outcome::Done(Err(e));
        }
        match handoff.0.into_inner() {
            Some(message) => Outcome::Clipboard(message),
            None => Outcome::Done(Ok(())),
        }
    }
}

fn track_urls(loaded: &Loaded) -> Vec<TrackUrl> {
    match loaded {
        Loaded::OwnSongs(urls) | Loaded::FriendSongs(_, urls) | Loaded::TodaysPlaylist(urls) => {
            urls.clone()
        }
        Loaded::Friends(_) => Vec::new(),
    }
}

fn handle(services: &Services, outbound: Outbound, tx: &Sender<AppEvent>) {
    match outbound {
        Outbound::Load(ticket) => match services.load(&ticket.kind) {
            Ok(loaded) => {
                let urls = track_urls(&loaded);
                if tx.send_blocking(AppEvent::Loaded(ticket, loaded)).is_err() {
                    return;
                }
                for url in urls {
                    if let Some(meta) = services.resolver.resolve_track(&url)
                        && tx.send_blocking(AppEvent::TrackResolved(url, meta)).is_err()
                    {
                        return;
                    }
                }
            }
            Err(e) => {
                let _ = tx.send_blocking(AppEvent::LoadFailed(ticket, e));
            }
        },
        Outbound::Job(job) => {
            log::debug!("Running {}", job.request);
            let event = match services.run(&job) {
                Outcome::Done(result) => AppEvent::JobDone(job.id, result),
                Outcome::Clipboard(message) => AppEvent::ShareOnClipboard(job.id, message),
            };
            let _ = tx.send_blocking(event);
        }
    }
}

pub async fn run_worker(services: Arc<Services>, rx: Receiver<Outbound>, tx: Sender<AppEvent>) {
    while let Ok(outbound) = rx.recv().await {
        let services = services.clone();
        let tx = tx.clone();
        tokio::task::spawn_blocking(move || handle(&services, outbound, &tx));
    }
}
