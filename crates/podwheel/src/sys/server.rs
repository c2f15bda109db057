use crate::events::AppEvent;
use async_channel::Sender;
use clickwheel::Rotation;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

/// One line on the control socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Command {
    #[strum(to_string = "show")]
    Show,
    #[strum(to_string = "hide")]
    Hide,
    #[strum(to_string = "cw", serialize = "next")]
    Clockwise,
    #[strum(to_string = "ccw", serialize = "prev")]
    CounterClockwise,
    #[strum(to_string = "select", serialize = "center")]
    Select,
    #[strum(to_string = "menu")]
    Menu,
    #[strum(to_string = "play")]
    PlayPause,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        line.trim().parse().ok()
    }

    pub fn event(self) -> AppEvent {
        match self {
            Self::Show => AppEvent::Show,
            Self::Hide => AppEvent::Hide,
            Self::Clockwise => AppEvent::Rotate(Rotation::Clockwise),
            Self::CounterClockwise => AppEvent::Rotate(Rotation::CounterClockwise),
            Self::Select => AppEvent::Select,
            Self::Menu => AppEvent::Menu,
            Self::PlayPause => AppEvent::PlayPause,
        }
    }
}

pub async fn run_server(socket_path: PathBuf, tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if fs_err::metadata(&socket_path).is_ok() {
        let _ = fs_err::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        match Command::parse(&line) {
                            Some(command) => {
                                if tx.send(command.event()).await.is_err() {
                                    break;
                                }
                            }
                            None => log::warn!("Unknown command {:?}", line.trim()),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
