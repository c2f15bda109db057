use crate::config::Config;
use clickwheel::collab::CollaboratorError;
use clickwheel::dispatch::Destination;
use std::path::Path;

/// Where a destination lives: the web app for pages, the data file for
/// editing the local five.
pub fn target(destination: &Destination, config: &Config, data_file: &Path) -> String {
    match destination {
        Destination::EditMyFive => data_file.display().to_string(),
        Destination::SubmitSong => config.submit_url(),
        Destination::Track(url) => url.to_string(),
    }
}

pub fn open(target: &str) -> Result<(), CollaboratorError> {
    open_with("xdg-open", target)
}

/// Runs `launcher` on `target` and waits for it. Called from the worker's
/// blocking pool.
fn open_with(launcher: &str, target: &str) -> Result<(), CollaboratorError> {
    log::info!("Opening {}", target);
    let status = std::process::Command::new(launcher)
        .arg(target)
        .status()
        .map_err(|e| CollaboratorError::NotFound(format!("{}: {}", launcher, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(CollaboratorError::NotFound(format!(
            "{} {} exited with {}",
            launcher, target, status
        )))
    }
}
