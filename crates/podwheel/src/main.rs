use clickwheel::collab::IdentityService;
use podwheel::config;
use podwheel::events::AppEvent;
use podwheel::gui::app::{AppInit, AppModel};
use podwheel::sys::runtime;
use podwheel::sys::worker::Services;
use relm4::prelude::*;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::debug!("Config at {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }
    let config = config::load_or_default();
    let services = Arc::new(Services::open(&config)?);

    let (tx, rx) = async_channel::unbounded();
    let (work_tx, work_rx) = async_channel::unbounded();

    {
        let tx = tx.clone();
        services
            .identity
            .on_identity_change(Box::new(move |identity| {
                let _ = tx.send_blocking(AppEvent::IdentityChanged(identity));
            }));
    }

    // Start Background Services
    runtime::start_background_services(
        config.socket_path.clone(),
        services.clone(),
        tx,
        work_rx,
    );

    let app = RelmApp::new("app.myfive.podwheel");

    app.run::<AppModel>(AppInit {
        config,
        services,
        work_tx,
        rx,
    });
    Ok(())
}
