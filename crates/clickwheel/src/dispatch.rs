//! Resolves centre and menu button presses into [`Effect`]s.
//!
//! Nothing here performs I/O. Requests for the outside world come back as
//! [`Effect::InvokeCollaborator`] and are serviced by the shell.

use crate::collab::{Confirm, TrackUrl};
use crate::menu::{self, MenuItem, Snapshot};
use crate::view::{Frame, ViewContext};
use derive_more::Display;

pub const DELETE_ACCOUNT_PROMPT: &str =
    "Delete your account? Your five, your friends and your profile will be removed.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    EnterContext(ViewContext),
    /// Return to the immediate logical parent.
    Back,
    ExitToMain,
    InvokeCollaborator(Request),
    TogglePlayback,
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Destination {
    EditMyFive,
    SubmitSong,
    #[display("Track({_0})")]
    Track(TrackUrl),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum Request {
    SignIn,
    SignOut,
    DeleteAccount,
    ShareProfile,
    #[display("Navigate({_0})")]
    Navigate(Destination),
}

impl Request {
    /// Requests whose success ends the session.
    pub fn ends_session(&self) -> bool {
        matches!(self, Self::SignOut | Self::DeleteAccount)
    }
}

/// Centre button. `item` is the highlighted entry of `frame`, if the list is
/// not empty. Anything without an entry in the table is inert.
pub fn commit(
    frame: &Frame,
    item: Option<MenuItem>,
    snapshot: &Snapshot<'_>,
    confirm: &mut dyn Confirm,
) -> Effect {
    let Some(item) = item else {
        return Effect::NoOp;
    };
    if !item.gate().admits(snapshot.auth) {
        return Effect::NoOp;
    }

    match frame.context {
        ViewContext::MainMenu => main_menu(item, snapshot),
        ViewContext::Settings => settings(item, confirm),
        ViewContext::MyFiveAuth => match item {
            MenuItem::SignIn => Effect::InvokeCollaborator(Request::SignIn),
            MenuItem::PrivacyPolicy => Effect::EnterContext(ViewContext::PrivacyPolicy),
            _ => Effect::NoOp,
        },
        ViewContext::MyFive | ViewContext::TodaysPlaylist => match item {
            MenuItem::Track(i) if menu::track_at(frame, snapshot.catalog, i).is_some() => {
                Effect::EnterContext(ViewContext::Music)
            }
            _ => Effect::NoOp,
        },
        ViewContext::Friends => match item {
            MenuItem::FriendsList => Effect::EnterContext(ViewContext::FriendsList),
            MenuItem::ShareProfile => Effect::InvokeCollaborator(Request::ShareProfile),
            _ => Effect::NoOp,
        },
        ViewContext::FriendsList => match item {
            MenuItem::Friend(i) if snapshot.catalog.friend(i).is_some() => {
                Effect::EnterContext(ViewContext::MyFive)
            }
            _ => Effect::NoOp,
        },
        ViewContext::DailyDrop => match item {
            MenuItem::SubmitSong => {
                Effect::InvokeCollaborator(Request::Navigate(Destination::SubmitSong))
            }
            MenuItem::TodaysPlaylist => Effect::EnterContext(ViewContext::TodaysPlaylist),
            _ => Effect::NoOp,
        },
        ViewContext::About => match item {
            MenuItem::PrivacyPolicy => Effect::EnterContext(ViewContext::PrivacyPolicy),
            _ => Effect::NoOp,
        },
        ViewContext::Music => match (item, snapshot.now_playing) {
            (MenuItem::PlayPause, Some(_)) => Effect::TogglePlayback,
            (MenuItem::OpenTrack, Some(track)) => Effect::InvokeCollaborator(Request::Navigate(
                Destination::Track(track.open_url().clone()),
            )),
            _ => Effect::NoOp,
        },
        ViewContext::PrivacyPolicy => Effect::NoOp,
    }
}

fn main_menu(item: MenuItem, snapshot: &Snapshot<'_>) -> Effect {
    let context = match item {
        MenuItem::MyFive if snapshot.auth.is_signed_in() => ViewContext::MyFive,
        MenuItem::MyFive => ViewContext::MyFiveAuth,
        MenuItem::Friends => ViewContext::Friends,
        MenuItem::DailyDrop => ViewContext::DailyDrop,
        MenuItem::TodaysPlaylist => ViewContext::TodaysPlaylist,
        MenuItem::Music => ViewContext::Music,
        MenuItem::Settings => ViewContext::Settings,
        MenuItem::About => ViewContext::About,
        _ => return Effect::NoOp,
    };
    Effect::EnterContext(context)
}

fn settings(item: MenuItem, confirm: &mut dyn Confirm) -> Effect {
    match item {
        MenuItem::SignIn => Effect::InvokeCollaborator(Request::SignIn),
        MenuItem::EditMyFive => {
            Effect::InvokeCollaborator(Request::Navigate(Destination::EditMyFive))
        }
        MenuItem::ShareProfile => Effect::InvokeCollaborator(Request::ShareProfile),
        MenuItem::PrivacyPolicy => Effect::EnterContext(ViewContext::PrivacyPolicy),
        MenuItem::Logout => Effect::InvokeCollaborator(Request::SignOut),
        MenuItem::DeleteAccount if confirm.confirm(DELETE_ACCOUNT_PROMPT) => {
            Effect::InvokeCollaborator(Request::DeleteAccount)
        }
        MenuItem::DeleteAccount => {
            log::info!("Account deletion declined");
            Effect::NoOp
        }
        _ => Effect::NoOp,
    }
}

/// Menu button. Steps back one level; from a first-level screen that is the
/// main menu itself.
pub fn menu_press(depth: usize) -> Effect {
    match depth {
        0 | 1 => Effect::NoOp,
        2 => Effect::ExitToMain,
        _ => Effect::Back,
    }
}
