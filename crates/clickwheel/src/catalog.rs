use crate::collab::{Handle, IdentityId, TrackMeta, TrackUrl};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub url: TrackUrl,
    pub meta: Option<TrackMeta>,
}

impl Track {
    pub fn new(url: TrackUrl) -> Self {
        Self { url, meta: None }
    }

    pub fn label(&self) -> String {
        match &self.meta {
            Some(meta) if meta.artist.is_empty() => meta.title.clone(),
            Some(meta) => format!("{} - {}", meta.title, meta.artist),
            None => self.url.to_string(),
        }
    }

    /// Where "open" should go: the resolver's canonical link when known.
    pub fn open_url(&self) -> &TrackUrl {
        self.meta
            .as_ref()
            .map(|m| &m.canonical_url)
            .unwrap_or(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Friend {
    pub id: IdentityId,
    pub display_name: String,
    pub handle: Handle,
}

impl Friend {
    pub fn label(&self) -> String {
        if self.display_name.is_empty() {
            format!("@{}", self.handle)
        } else {
            self.display_name.clone()
        }
    }
}

/// Whose songs a `MyFive` frame lists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Subject {
    #[default]
    Own,
    Friend(IdentityId),
}

/// What a finished load carries back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    OwnSongs(Vec<TrackUrl>),
    Friends(Vec<Friend>),
    FriendSongs(IdentityId, Vec<TrackUrl>),
    TodaysPlaylist(Vec<TrackUrl>),
}

/// List contents supplied from outside the core. Background work only ever
/// replaces these; selection indices live in the view stack.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    own_songs: Vec<Track>,
    friends: Vec<Friend>,
    friend_songs: HashMap<IdentityId, Vec<Track>>,
    todays_playlist: Vec<Track>,
    meta: HashMap<TrackUrl, TrackMeta>,
}

impl Catalog {
    pub fn own_songs(&self) -> &[Track] {
        &self.own_songs
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn friend_songs(&self, id: &IdentityId) -> &[Track] {
        self.friend_songs.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn todays_playlist(&self) -> &[Track] {
        &self.todays_playlist
    }

    pub fn songs_of(&self, subject: &Subject) -> &[Track] {
        match subject {
            Subject::Own => self.own_songs(),
            Subject::Friend(id) => self.friend_songs(id),
        }
    }

    pub fn friend(&self, index: usize) -> Option<&Friend> {
        self.friends.get(index)
    }

    pub fn friend_by_id(&self, id: &IdentityId) -> Option<&Friend> {
        self.friends.iter().find(|f| &f.id == id)
    }

    pub fn apply(&mut self, loaded: Loaded) {
        match loaded {
            Loaded::OwnSongs(urls) => self.own_songs = self.tracks(urls),
            Loaded::Friends(friends) => self.friends = friends,
            Loaded::FriendSongs(id, urls) => {
                let tracks = self.tracks(urls);
                self.friend_songs.insert(id, tracks);
            }
            Loaded::TodaysPlaylist(urls) => self.todays_playlist = self.tracks(urls),
        }
    }

    /// Whether any list currently shows `url`.
    pub fn lists(&self, url: &TrackUrl) -> bool {
        std::iter::once(&self.own_songs)
            .chain(std::iter::once(&self.todays_playlist))
            .chain(self.friend_songs.values())
            .any(|list| list.iter().any(|t| &t.url == url))
    }

    /// Attaches resolved metadata to every listing of `url`. Metadata that
    /// arrives before its list is kept and applied when the list shows up.
    pub fn resolve(&mut self, url: &TrackUrl, meta: TrackMeta) {
        let lists = std::iter::once(&mut self.own_songs)
            .chain(std::iter::once(&mut self.todays_playlist))
            .chain(self.friend_songs.values_mut());
        for list in lists {
            list.iter_mut()
                .filter(|t| &t.url == url)
                .for_each(|t| t.meta = Some(meta.clone()));
        }
        self.meta.insert(url.clone(), meta);
    }

    /// Drops everything that belongs to the signed-in viewer, including
    /// metadata for tracks only they listed. Today's playlist is public and
    /// stays.
    pub fn clear_viewer(&mut self) {
        self.own_songs.clear();
        self.friends.clear();
        self.friend_songs.clear();
        let public = &self.todays_playlist;
        self.meta.retain(|url, _| public.iter().any(|t| &t.url == url));
    }

    fn tracks(&self, urls: Vec<TrackUrl>) -> Vec<Track> {
        urls.into_iter()
            .map(|url| Track {
                meta: self.meta.get(&url).cloned(),
                url,
            })
            .collect()
    }
}
