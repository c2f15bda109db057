use crate::events::AppEvent;
use crate::sys::worker::{self, Services};
use async_channel::{Receiver, Sender};
use clickwheel::controller::Outbound;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tokio::runtime::Runtime;

pub fn start_background_services(
    socket_path: PathBuf,
    services: Arc<Services>,
    tx: Sender<AppEvent>,
    work_rx: Receiver<Outbound>,
) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::sys::server::run_server(socket_path, tx).await;
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            worker::run_worker(services, work_rx, tx).await;
        });
    });
}
