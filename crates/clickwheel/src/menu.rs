use crate::catalog::{Catalog, Subject, Track};
use crate::collab::Identity;
use crate::view::{Frame, ViewContext};

/// Most songs a profile publishes.
pub const MAX_SONGS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    MyFive,
    Friends,
    DailyDrop,
    TodaysPlaylist,
    Music,
    Settings,
    About,
    SignIn,
    EditMyFive,
    ShareProfile,
    PrivacyPolicy,
    Logout,
    DeleteAccount,
    FriendsList,
    SubmitSong,
    PlayPause,
    OpenTrack,
    Track(usize),
    Friend(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthState {
    SignedOut,
    SignedIn,
}

impl AuthState {
    pub fn of(identity: Option<&Identity>) -> Self {
        if identity.is_some() {
            Self::SignedIn
        } else {
            Self::SignedOut
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn)
    }
}

/// Who may act on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Anyone,
    SignedIn,
    SignedOut,
}

impl Gate {
    pub fn admits(&self, auth: AuthState) -> bool {
        match self {
            Self::Anyone => true,
            Self::SignedIn => auth == AuthState::SignedIn,
            Self::SignedOut => auth == AuthState::SignedOut,
        }
    }
}

impl MenuItem {
    pub fn gate(&self) -> Gate {
        match self {
            Self::Friends
            | Self::Settings
            | Self::EditMyFive
            | Self::ShareProfile
            | Self::Logout
            | Self::DeleteAccount
            | Self::FriendsList
            | Self::SubmitSong
            | Self::Friend(_) => Gate::SignedIn,
            Self::SignIn => Gate::SignedOut,
            Self::MyFive
            | Self::DailyDrop
            | Self::TodaysPlaylist
            | Self::Music
            | Self::About
            | Self::PrivacyPolicy
            | Self::PlayPause
            | Self::OpenTrack
            | Self::Track(_) => Gate::Anyone,
        }
    }

    /// Label for items whose text does not depend on loaded data.
    pub fn title(&self) -> Option<&'static str> {
        let title = match self {
            Self::MyFive => "My Five",
            Self::Friends => "Friends",
            Self::DailyDrop => "Daily Drop",
            Self::TodaysPlaylist => "Today's Playlist",
            Self::Music => "Music",
            Self::Settings => "Settings",
            Self::About => "About",
            Self::SignIn => "Sign In",
            Self::EditMyFive => "Edit My Five",
            Self::ShareProfile => "Share Profile",
            Self::PrivacyPolicy => "Privacy Policy",
            Self::Logout => "Logout",
            Self::DeleteAccount => "Delete Account",
            Self::FriendsList => "Friends List",
            Self::SubmitSong => "Submit Today's Song",
            Self::OpenTrack => "Open Track",
            Self::PlayPause | Self::Track(_) | Self::Friend(_) => return None,
        };
        Some(title)
    }

    /// Whether selecting this item descends into another list. Drawn with a
    /// chevron by the shell.
    pub fn has_children(&self) -> bool {
        matches!(
            self,
            Self::MyFive
                | Self::Friends
                | Self::DailyDrop
                | Self::TodaysPlaylist
                | Self::Music
                | Self::Settings
                | Self::About
                | Self::PrivacyPolicy
                | Self::FriendsList
                | Self::Friend(_)
        )
    }
}

/// Everything outside the view stack that list contents depend on.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub catalog: &'a Catalog,
    pub auth: AuthState,
    pub now_playing: Option<&'a Track>,
    pub playing: bool,
}

/// Items shown for `frame`, with anything the viewer cannot act on left out.
pub fn items(frame: &Frame, snapshot: &Snapshot<'_>) -> Vec<MenuItem> {
    let all: Vec<MenuItem> = match frame.context {
        ViewContext::MainMenu => vec![
            MenuItem::MyFive,
            MenuItem::Friends,
            MenuItem::DailyDrop,
            MenuItem::TodaysPlaylist,
            MenuItem::Music,
            MenuItem::Settings,
            MenuItem::About,
        ],
        ViewContext::Settings => vec![
            MenuItem::SignIn,
            MenuItem::EditMyFive,
            MenuItem::ShareProfile,
            MenuItem::PrivacyPolicy,
            MenuItem::Logout,
            MenuItem::DeleteAccount,
        ],
        ViewContext::MyFiveAuth => vec![MenuItem::SignIn, MenuItem::PrivacyPolicy],
        ViewContext::MyFive => {
            let songs = snapshot.catalog.songs_of(&frame.subject);
            (0..songs.len().min(MAX_SONGS)).map(MenuItem::Track).collect()
        }
        ViewContext::Friends => vec![MenuItem::FriendsList, MenuItem::ShareProfile],
        ViewContext::FriendsList => (0..snapshot.catalog.friends().len())
            .map(MenuItem::Friend)
            .collect(),
        ViewContext::DailyDrop => vec![MenuItem::SubmitSong, MenuItem::TodaysPlaylist],
        ViewContext::TodaysPlaylist => (0..snapshot.catalog.todays_playlist().len())
            .map(MenuItem::Track)
            .collect(),
        ViewContext::About => vec![MenuItem::PrivacyPolicy],
        ViewContext::PrivacyPolicy => Vec::new(),
        ViewContext::Music => match snapshot.now_playing {
            Some(_) => vec![MenuItem::PlayPause, MenuItem::OpenTrack],
            None => Vec::new(),
        },
    };

    all.into_iter()
        .filter(|item| item.gate().admits(snapshot.auth))
        .collect()
}

/// The track a `Track(i)` item points at in `frame`.
pub fn track_at<'a>(frame: &Frame, catalog: &'a Catalog, index: usize) -> Option<&'a Track> {
    match frame.context {
        ViewContext::MyFive => catalog.songs_of(&frame.subject).get(index),
        ViewContext::TodaysPlaylist => catalog.todays_playlist().get(index),
        _ => None,
    }
}

pub fn label(item: MenuItem, frame: &Frame, snapshot: &Snapshot<'_>) -> String {
    match item {
        MenuItem::Track(i) => track_at(frame, snapshot.catalog, i)
            .map(Track::label)
            .unwrap_or_default(),
        MenuItem::Friend(i) => snapshot
            .catalog
            .friend(i)
            .map(|f| f.label())
            .unwrap_or_default(),
        MenuItem::PlayPause if snapshot.playing => "Pause".to_string(),
        MenuItem::PlayPause => "Play".to_string(),
        other => other.title().unwrap_or_default().to_string(),
    }
}

/// Heading for `frame`; a friend's five is titled with their name.
pub fn heading(frame: &Frame, catalog: &Catalog) -> String {
    match (&frame.context, &frame.subject) {
        (ViewContext::MyFive, Subject::Friend(id)) => catalog
            .friend_by_id(id)
            .map(|f| format!("{}'s Five", f.label()))
            .unwrap_or_else(|| frame.context.to_string()),
        (context, _) => context.to_string(),
    }
}
