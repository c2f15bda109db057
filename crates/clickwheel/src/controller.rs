//! The navigation state a shell renders from, and the handlers it calls.
//!
//! A [`Controller`] lives on the UI thread and is only mutated through its
//! handlers. Work that needs the outside world is queued as [`Outbound`]
//! items; results come back through [`Controller::deliver`],
//! [`Controller::resolve_track`], [`Controller::complete`] and
//! [`Controller::set_identity`].

use crate::catalog::{Catalog, Loaded, Subject, Track};
use crate::collab::{
    CollaboratorError, Confirm, Haptics, Identity, IdentityId, NoHaptics, TrackMeta, TrackUrl,
};
use crate::dispatch::{self, Effect, Request};
use crate::geometry::{AngleTracker, Point, Rotation, Wheel};
use crate::menu::{self, AuthState, MenuItem, Snapshot};
use crate::reducer;
use crate::view::{Frame, FrameId, ViewContext, ViewStack};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub id: JobId,
    pub request: Request,
    /// Who was signed in when the request was made.
    pub identity: Option<Identity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadKind {
    OwnSongs(IdentityId),
    Friends(IdentityId),
    FriendSongs(IdentityId),
    TodaysPlaylist,
}

/// Names the frame a load was started for. Results for frames that have
/// since left the stack are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub frame: FrameId,
    pub kind: LoadKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Load(LoadTicket),
    Job(Job),
}

pub struct Controller {
    stack: ViewStack,
    tracker: AngleTracker,
    wheel: Wheel,
    haptics: Box<dyn Haptics>,
    catalog: Catalog,
    identity: Option<Identity>,
    now_playing: Option<Track>,
    playing: bool,
    pending: Option<Job>,
    next_job: u64,
    notice: Option<String>,
    outbox: Vec<Outbound>,
}

fn snapshot<'a>(
    catalog: &'a Catalog,
    identity: Option<&Identity>,
    now_playing: Option<&'a Track>,
    playing: bool,
) -> Snapshot<'a> {
    Snapshot {
        catalog,
        auth: AuthState::of(identity),
        now_playing,
        playing,
    }
}

impl Controller {
    pub fn new(wheel: Wheel, dead_zone: f64) -> Self {
        Self {
            stack: ViewStack::new(),
            tracker: AngleTracker::new(dead_zone),
            wheel,
            haptics: Box::new(NoHaptics),
            catalog: Catalog::default(),
            identity: None,
            now_playing: None,
            playing: false,
            pending: None,
            next_job: 0,
            notice: None,
            outbox: Vec::new(),
        }
    }

    pub fn with_haptics(mut self, haptics: Box<dyn Haptics>) -> Self {
        self.haptics = haptics;
        self
    }

    pub fn set_haptics(&mut self, haptics: Box<dyn Haptics>) {
        self.haptics = haptics;
    }

    pub fn set_wheel(&mut self, wheel: Wheel) {
        if wheel != self.wheel {
            self.wheel = wheel;
            self.tracker.on_pointer_leave();
        }
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn set_dead_zone(&mut self, degrees: f64) {
        self.tracker.set_threshold(degrees);
    }

    // -- read side --

    pub fn active_context(&self) -> ViewContext {
        self.stack.active()
    }

    pub fn active_frame(&self) -> &Frame {
        self.stack.active_frame()
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        snapshot(
            &self.catalog,
            self.identity.as_ref(),
            self.now_playing.as_ref(),
            self.playing,
        )
    }

    pub fn items(&self) -> Vec<MenuItem> {
        menu::items(self.stack.active_frame(), &self.snapshot())
    }

    /// Highlighted position in the active list, always valid for its current
    /// length.
    pub fn selection(&self) -> usize {
        reducer::clamp(self.stack.selection(), self.items().len())
    }

    pub fn selected_item(&self) -> Option<MenuItem> {
        self.items().get(self.selection()).copied()
    }

    pub fn label(&self, item: MenuItem) -> String {
        menu::label(item, self.stack.active_frame(), &self.snapshot())
    }

    pub fn title(&self) -> String {
        menu::heading(self.stack.active_frame(), &self.catalog)
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn now_playing(&self) -> Option<&Track> {
        self.now_playing.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// A collaborator request is outstanding; commits are ignored meanwhile.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn drain_outbox(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outbox)
    }

    // -- input handlers --

    pub fn pointer_move(&mut self, pointer: Point) -> Option<Rotation> {
        let rotation = self
            .tracker
            .on_pointer_move(pointer, &self.wheel, self.haptics.as_ref());
        if let Some(rotation) = rotation {
            self.rotate(rotation);
        }
        rotation
    }

    pub fn pointer_leave(&mut self) {
        self.tracker.on_pointer_leave();
    }

    pub fn rotate(&mut self, rotation: Rotation) {
        let len = self.items().len();
        let frame = self.stack.active_frame_mut();
        frame.selection = reducer::step(frame.context, frame.selection, len, rotation);
    }

    pub fn commit(&mut self, confirm: &mut dyn Confirm) -> Effect {
        if let Some(job) = &self.pending {
            log::debug!("Commit ignored while {} is pending", job.request);
            return Effect::NoOp;
        }

        let frame = self.stack.active_frame().clone();
        let item = self.selected_item();
        let effect = dispatch::commit(&frame, item, &self.snapshot(), confirm);
        log::debug!("commit {:?} in {} -> {:?}", item, frame.context, effect);
        self.apply(&frame, item, &effect);
        effect
    }

    pub fn menu_press(&mut self) -> Effect {
        let effect = dispatch::menu_press(self.stack.depth());
        let frame = self.stack.active_frame().clone();
        self.apply(&frame, None, &effect);
        effect
    }

    /// The wheel's play/pause zone. Only meaningful once something plays.
    pub fn toggle_playback(&mut self) {
        if self.now_playing.is_some() {
            self.playing = !self.playing;
        }
    }

    fn apply(&mut self, frame: &Frame, item: Option<MenuItem>, effect: &Effect) {
        match effect {
            Effect::EnterContext(context) => self.enter(*context, frame, item),
            Effect::Back => {
                self.stack.exit();
            }
            Effect::ExitToMain => self.stack.exit_to_main(),
            Effect::TogglePlayback => self.toggle_playback(),
            Effect::InvokeCollaborator(request) => {
                let job = Job {
                    id: JobId(self.next_job),
                    request: request.clone(),
                    identity: self.identity.clone(),
                };
                self.next_job += 1;
                self.notice = None;
                self.pending = Some(job.clone());
                self.outbox.push(Outbound::Job(job));
            }
            Effect::NoOp => {}
        }
    }

    fn enter(&mut self, context: ViewContext, from: &Frame, item: Option<MenuItem>) {
        let subject = match item {
            Some(MenuItem::Friend(i)) => self
                .catalog
                .friend(i)
                .map(|f| Subject::Friend(f.id.clone()))
                .unwrap_or_default(),
            _ => Subject::Own,
        };

        if context == ViewContext::Music
            && let Some(MenuItem::Track(i)) = item
            && let Some(track) = menu::track_at(from, &self.catalog, i)
        {
            self.now_playing = Some(track.clone());
            self.playing = true;
        }

        let id = self.stack.enter(context, subject.clone());
        self.queue_load(id, context, &subject);
    }

    fn queue_load(&mut self, frame: FrameId, context: ViewContext, subject: &Subject) {
        if !context.needs_load() {
            return;
        }
        let own = self.identity.as_ref().map(|i| i.id.clone());
        let kind = match (context, subject) {
            (ViewContext::MyFive, Subject::Friend(id)) => LoadKind::FriendSongs(id.clone()),
            (ViewContext::MyFive, Subject::Own) => match own {
                Some(id) => LoadKind::OwnSongs(id),
                None => return,
            },
            (ViewContext::FriendsList, _) => match own {
                Some(id) => LoadKind::Friends(id),
                None => return,
            },
            (ViewContext::TodaysPlaylist, _) => LoadKind::TodaysPlaylist,
            _ => return,
        };
        self.outbox.push(Outbound::Load(LoadTicket { frame, kind }));
    }

    // -- results from collaborators --

    /// Applies a finished load. Returns false when the frame it was started
    /// for is gone and the result was discarded.
    pub fn deliver(&mut self, ticket: &LoadTicket, loaded: Loaded) -> bool {
        if !self.stack.contains(ticket.frame) {
            log::debug!("Discarding stale {:?} load", ticket.kind);
            return false;
        }
        self.catalog.apply(loaded);
        self.clamp_selections();
        true
    }

    /// Surfaces a load that could not finish, unless its frame is gone.
    pub fn load_failed(&mut self, ticket: &LoadTicket, error: &CollaboratorError) -> bool {
        if !self.stack.contains(ticket.frame) {
            return false;
        }
        log::warn!("{:?} load failed: {}", ticket.kind, error);
        let what = match ticket.kind {
            LoadKind::OwnSongs(_) | LoadKind::FriendSongs(_) => "songs",
            LoadKind::Friends(_) => "friends",
            LoadKind::TodaysPlaylist => "today's playlist",
        };
        self.notice = Some(format!("Couldn't load {what}: {error}"));
        true
    }

    /// Applies looked-up metadata to the lists and the playing track. Lookups
    /// for tracks no longer shown anywhere are dropped.
    pub fn resolve_track(&mut self, url: &TrackUrl, meta: TrackMeta) {
        let playing = self.now_playing.as_ref().is_some_and(|t| &t.url == url);
        if !playing && !self.catalog.lists(url) {
            log::debug!("Dropping metadata for unlisted {}", url);
            return;
        }
        self.catalog.resolve(url, meta.clone());
        if let Some(track) = self.now_playing.as_mut().filter(|t| &t.url == url) {
            track.meta = Some(meta);
        }
    }

    pub fn complete(&mut self, id: JobId, result: Result<(), CollaboratorError>) {
        let Some(job) = self.pending.take_if(|job| job.id == id) else {
            log::debug!("Ignoring completion of unknown job {:?}", id);
            return;
        };
        match result {
            Ok(()) if job.request.ends_session() => {
                log::info!("{} finished", job.request);
                self.set_identity(None);
            }
            Ok(()) => log::info!("{} finished", job.request),
            Err(e) => {
                log::error!("{} failed: {}", job.request, e);
                self.notice = Some(format!("Couldn't {}: {}", describe(&job.request), e));
            }
        }
    }

    pub fn set_identity(&mut self, identity: Option<Identity>) {
        let changed = self.identity.as_ref().map(|i| &i.id) != identity.as_ref().map(|i| &i.id);
        self.identity = identity;
        if !changed {
            return;
        }

        self.catalog.clear_viewer();
        match &self.identity {
            None => {
                log::info!("Signed out, returning to the main menu");
                self.stack.reset();
            }
            Some(identity) => {
                log::info!("Signed in as {}", identity.handle);
                self.notice = None;
                if self.stack.active() == ViewContext::MyFiveAuth {
                    let from = self.stack.active_frame().clone();
                    self.stack.exit();
                    self.enter(ViewContext::MyFive, &from, None);
                } else {
                    // frames from a previous session may list someone else's data
                    self.stack.reset();
                }
            }
        }
        self.clamp_selections();
    }

    fn clamp_selections(&mut self) {
        let snapshot = snapshot(
            &self.catalog,
            self.identity.as_ref(),
            self.now_playing.as_ref(),
            self.playing,
        );
        for frame in self.stack.frames_mut() {
            let len = menu::items(frame, &snapshot).len();
            frame.selection = reducer::clamp(frame.selection, len);
        }
    }
}

fn describe(request: &Request) -> &'static str {
    match request {
        Request::SignIn => "sign in",
        Request::SignOut => "sign out",
        Request::DeleteAccount => "delete your account",
        Request::ShareProfile => "share your profile",
        Request::Navigate(_) => "open that page",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Friend;
    use crate::collab::Handle;
    use crate::dispatch::Destination;
    use crate::geometry::DEFAULT_DEAD_ZONE;

    fn identity(id: &str) -> Identity {
        Identity {
            id: IdentityId::new(id),
            handle: Handle::new(id),
            display_name: id.to_uppercase(),
        }
    }

    fn friend(id: &str) -> Friend {
        Friend {
            id: IdentityId::new(id),
            display_name: id.to_uppercase(),
            handle: Handle::new(id),
        }
    }

    fn controller() -> Controller {
        Controller::new(Wheel::new(Point::new(100.0, 100.0), 100.0), DEFAULT_DEAD_ZONE)
    }

    fn signed_in() -> Controller {
        let mut c = controller();
        c.set_identity(Some(identity("me")));
        c
    }

    fn accept() -> impl FnMut(&str) -> bool {
        |_: &str| true
    }

    fn select(c: &mut Controller, item: MenuItem) {
        let index = c
            .items()
            .iter()
            .position(|i| *i == item)
            .unwrap_or_else(|| panic!("{item:?} not listed in {}", c.active_context()));
        while c.selection() != index {
            c.rotate(Rotation::Clockwise);
        }
    }

    fn open(c: &mut Controller, item: MenuItem) -> Effect {
        select(c, item);
        c.commit(&mut accept())
    }

    fn take_load(c: &mut Controller) -> LoadTicket {
        c.drain_outbox()
            .into_iter()
            .find_map(|o| match o {
                Outbound::Load(ticket) => Some(ticket),
                Outbound::Job(_) => None,
            })
            .expect("a load was queued")
    }

    fn take_job(c: &mut Controller) -> Job {
        c.drain_outbox()
            .into_iter()
            .find_map(|o| match o {
                Outbound::Job(job) => Some(job),
                Outbound::Load(_) => None,
            })
            .expect("a job was queued")
    }

    #[test]
    fn test_pointer_turn_moves_selection() {
        let mut c = signed_in();
        let center = Point::new(100.0, 100.0);
        assert_eq!(c.items().len(), 7);
        assert_eq!(c.pointer_move(Point::on_circle(center, 80.0, 10.0)), None);
        assert_eq!(
            c.pointer_move(Point::on_circle(center, 80.0, 40.0)),
            Some(Rotation::Clockwise)
        );
        assert_eq!(c.selection(), 1);
    }

    #[test]
    fn test_pointer_over_screen_does_not_scroll() {
        let mut c = signed_in();
        let center = Point::new(100.0, 100.0);
        assert_eq!(c.pointer_move(Point::on_circle(center, 400.0, 10.0)), None);
        assert_eq!(c.pointer_move(Point::on_circle(center, 400.0, 40.0)), None);
        assert_eq!(c.selection(), 0);
    }

    #[test]
    fn test_rotation_only_touches_active_context() {
        let mut c = signed_in();
        c.rotate(Rotation::Clockwise);
        c.rotate(Rotation::Clockwise);
        open(&mut c, MenuItem::About);
        let main_before = c.stack.selection_of(ViewContext::MainMenu);
        c.rotate(Rotation::Clockwise);
        c.rotate(Rotation::CounterClockwise);
        c.rotate(Rotation::Clockwise);
        assert_eq!(c.stack.selection_of(ViewContext::MainMenu), main_before);
    }

    #[test]
    fn test_signed_out_settings_is_not_offered() {
        let mut c = controller();
        assert!(!c.items().contains(&MenuItem::Settings));
        assert_eq!(
            open(&mut c, MenuItem::MyFive),
            Effect::EnterContext(ViewContext::MyFiveAuth)
        );
    }

    #[test]
    fn test_declined_delete_changes_nothing() {
        let mut c = signed_in();
        open(&mut c, MenuItem::Settings);
        select(&mut c, MenuItem::DeleteAccount);
        let mut decline = |_: &str| false;
        assert_eq!(c.commit(&mut decline), Effect::NoOp);
        assert_eq!(c.active_context(), ViewContext::Settings);
        assert!(c.drain_outbox().is_empty());
        assert!(!c.is_busy());
    }

    #[test]
    fn test_menu_returns_to_logical_parent() {
        let mut c = signed_in();
        open(&mut c, MenuItem::Friends);
        open(&mut c, MenuItem::FriendsList);
        let ticket = take_load(&mut c);
        assert_eq!(ticket.kind, LoadKind::Friends(IdentityId::new("me")));
        assert!(c.deliver(&ticket, Loaded::Friends(vec![friend("a"), friend("b"), friend("c")])));

        assert_eq!(
            open(&mut c, MenuItem::Friend(2)),
            Effect::EnterContext(ViewContext::MyFive)
        );
        assert_eq!(c.active_frame().subject, Subject::Friend(IdentityId::new("c")));
        assert_eq!(take_load(&mut c).kind, LoadKind::FriendSongs(IdentityId::new("c")));
        assert_eq!(c.title(), "C's Five");

        assert_eq!(c.menu_press(), Effect::Back);
        assert_eq!(c.active_context(), ViewContext::FriendsList);
        assert_eq!(c.selection(), 2);

        assert_eq!(c.menu_press(), Effect::Back);
        assert_eq!(c.menu_press(), Effect::ExitToMain);
        assert_eq!(c.active_context(), ViewContext::MainMenu);
        assert_eq!(c.selected_item(), Some(MenuItem::Friends));
        assert_eq!(c.menu_press(), Effect::NoOp);
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut c = signed_in();
        open(&mut c, MenuItem::MyFive);
        let ticket = take_load(&mut c);
        c.menu_press();

        let songs = vec![TrackUrl::new("https://t/1")];
        assert!(!c.deliver(&ticket, Loaded::OwnSongs(songs)));
        assert!(c.catalog().own_songs().is_empty());
        assert_eq!(c.active_context(), ViewContext::MainMenu);
    }

    #[test]
    fn test_load_failure_is_shown_only_for_live_frames() {
        let mut c = signed_in();
        open(&mut c, MenuItem::MyFive);
        let ticket = take_load(&mut c);
        let err = CollaboratorError::Network("offline".into());
        assert!(c.load_failed(&ticket, &err));
        assert!(c.notice().is_some_and(|n| n.contains("offline")));
        assert_eq!(c.active_context(), ViewContext::MyFive);

        c.dismiss_notice();
        c.menu_press();
        assert!(!c.load_failed(&ticket, &err));
        assert_eq!(c.notice(), None);
    }

    #[test]
    fn test_shrinking_list_clamps_selection() {
        let mut c = signed_in();
        open(&mut c, MenuItem::MyFive);
        let ticket = take_load(&mut c);
        let five: Vec<_> = (0..5).map(|i| TrackUrl::new(format!("https://t/{i}"))).collect();
        c.deliver(&ticket, Loaded::OwnSongs(five));
        select(&mut c, MenuItem::Track(4));

        c.deliver(&ticket, Loaded::OwnSongs(vec![TrackUrl::new("https://t/0")]));
        assert_eq!(c.stack.selection(), 0);
        assert_eq!(c.selected_item(), Some(MenuItem::Track(0)));

        c.deliver(&ticket, Loaded::OwnSongs(Vec::new()));
        assert_eq!(c.selection(), 0);
        assert_eq!(c.selected_item(), None);
        c.rotate(Rotation::Clockwise);
        assert_eq!(c.selection(), 0);
        assert_eq!(c.commit(&mut accept()), Effect::NoOp);
    }

    #[test]
    fn test_commit_is_debounced_while_pending() {
        let mut c = signed_in();
        open(&mut c, MenuItem::Settings);
        select(&mut c, MenuItem::Logout);
        assert_eq!(
            c.commit(&mut accept()),
            Effect::InvokeCollaborator(Request::SignOut)
        );
        let job = take_job(&mut c);
        assert!(c.is_busy());

        assert_eq!(c.commit(&mut accept()), Effect::NoOp);
        assert!(c.drain_outbox().is_empty());

        c.complete(job.id, Ok(()));
        assert!(!c.is_busy());
        assert_eq!(c.identity(), None);
        assert_eq!(c.active_context(), ViewContext::MainMenu);
        assert_eq!(c.selection(), 0);
    }

    #[test]
    fn test_failed_request_leaves_view_in_place() {
        let mut c = signed_in();
        open(&mut c, MenuItem::Settings);
        select(&mut c, MenuItem::DeleteAccount);
        c.commit(&mut accept());
        let job = take_job(&mut c);
        assert_eq!(job.request, Request::DeleteAccount);
        assert_eq!(job.identity, Some(identity("me")));

        c.complete(job.id, Err(CollaboratorError::Storage("disk full".into())));
        assert_eq!(c.active_context(), ViewContext::Settings);
        assert_eq!(c.selected_item(), Some(MenuItem::DeleteAccount));
        assert!(c.notice().is_some_and(|n| n.contains("delete your account")));
        assert!(c.identity().is_some());

        // retry is allowed once the failure is reported
        assert_eq!(
            c.commit(&mut accept()),
            Effect::InvokeCollaborator(Request::DeleteAccount)
        );
        assert_eq!(c.notice(), None);
    }

    #[test]
    fn test_unknown_completion_is_ignored() {
        let mut c = signed_in();
        c.complete(JobId(42), Err(CollaboratorError::NotSignedIn));
        assert_eq!(c.notice(), None);
    }

    #[test]
    fn test_sign_in_from_auth_screen_opens_my_five() {
        let mut c = controller();
        open(&mut c, MenuItem::MyFive);
        assert_eq!(
            open(&mut c, MenuItem::SignIn),
            Effect::InvokeCollaborator(Request::SignIn)
        );
        let job = take_job(&mut c);
        c.complete(job.id, Ok(()));
        c.set_identity(Some(identity("me")));

        assert_eq!(c.active_context(), ViewContext::MyFive);
        assert_eq!(c.depth(), 2);
        assert_eq!(take_load(&mut c).kind, LoadKind::OwnSongs(IdentityId::new("me")));
    }

    #[test]
    fn test_losing_identity_resets_and_forgets_viewer_data() {
        let mut c = signed_in();
        open(&mut c, MenuItem::Friends);
        open(&mut c, MenuItem::FriendsList);
        let ticket = take_load(&mut c);
        c.deliver(&ticket, Loaded::Friends(vec![friend("a")]));

        c.set_identity(None);
        assert_eq!(c.depth(), 1);
        assert!(c.catalog().friends().is_empty());
        assert!(!c.items().contains(&MenuItem::Friends));
    }

    #[test]
    fn test_metadata_for_forgotten_tracks_is_dropped() {
        let mut c = signed_in();
        open(&mut c, MenuItem::MyFive);
        let ticket = take_load(&mut c);
        let url = TrackUrl::new("https://t/mine");
        c.deliver(&ticket, Loaded::OwnSongs(vec![url.clone()]));

        c.set_identity(Some(identity("someone-else")));
        c.resolve_track(
            &url,
            TrackMeta {
                title: "Late".into(),
                artist: String::new(),
                art_src: None,
                canonical_url: url.clone(),
            },
        );
        c.catalog.apply(Loaded::OwnSongs(vec![url.clone()]));
        assert_eq!(c.catalog().own_songs()[0].label(), url.as_str());
    }

    #[test]
    fn test_playing_a_track_and_toggling() {
        let mut c = controller();
        open(&mut c, MenuItem::TodaysPlaylist);
        let ticket = take_load(&mut c);
        assert_eq!(ticket.kind, LoadKind::TodaysPlaylist);
        let url = TrackUrl::new("https://t/today");
        c.deliver(&ticket, Loaded::TodaysPlaylist(vec![url.clone()]));

        assert_eq!(
            open(&mut c, MenuItem::Track(0)),
            Effect::EnterContext(ViewContext::Music)
        );
        assert!(c.is_playing());
        assert_eq!(c.now_playing().map(|t| &t.url), Some(&url));

        assert_eq!(open(&mut c, MenuItem::PlayPause), Effect::TogglePlayback);
        assert!(!c.is_playing());
        assert_eq!(c.label(MenuItem::PlayPause), "Play");

        c.resolve_track(
            &url,
            TrackMeta {
                title: "Song".into(),
                artist: "Band".into(),
                art_src: None,
                canonical_url: TrackUrl::new("https://canon/song"),
            },
        );
        assert_eq!(
            open(&mut c, MenuItem::OpenTrack),
            Effect::InvokeCollaborator(Request::Navigate(Destination::Track(TrackUrl::new(
                "https://canon/song"
            ))))
        );
    }
}
