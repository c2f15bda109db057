use clickwheel::Rotation;
use clickwheel::catalog::Loaded;
use clickwheel::collab::{CollaboratorError, Identity, TrackMeta, TrackUrl};
use clickwheel::controller::{JobId, LoadTicket};

/// Everything that reaches the UI thread from outside it.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Show,
    Hide,
    Rotate(Rotation),
    Select,
    Menu,
    PlayPause,
    ConfigReload,
    IdentityChanged(Option<Identity>),
    Loaded(LoadTicket, Loaded),
    LoadFailed(LoadTicket, CollaboratorError),
    TrackResolved(TrackUrl, TrackMeta),
    JobDone(JobId, Result<(), CollaboratorError>),
    /// A profile share that only the window's clipboard can finish.
    ShareOnClipboard(JobId, String),
}
