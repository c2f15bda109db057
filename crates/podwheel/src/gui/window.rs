use crate::gui::wheel::{WINDOW_HEIGHT, WINDOW_WIDTH};
use clickwheel::collab::{CollaboratorError, Haptics, Sharer};
use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn init_window(window: &gtk::ApplicationWindow) {
    window.set_default_size(WINDOW_WIDTH, WINDOW_HEIGHT);
    window.set_resizable(true);
}

/// Copies share payloads to the clipboard of the window's display.
pub struct ClipboardSharer {
    clipboard: gdk::Clipboard,
}

impl ClipboardSharer {
    pub fn for_window(window: &gtk::ApplicationWindow) -> Self {
        Self {
            clipboard: window.clipboard(),
        }
    }
}

impl Sharer for ClipboardSharer {
    fn share(&self, payload: &str) -> Result<(), CollaboratorError> {
        self.clipboard.set_text(payload);
        log::info!("Copied share text to the clipboard");
        Ok(())
    }
}

/// Rings the display bell once per wheel step.
pub struct BellHaptics {
    display: Option<gdk::Display>,
}

impl BellHaptics {
    pub fn new() -> Self {
        Self {
            display: gdk::Display::default(),
        }
    }
}

impl Default for BellHaptics {
    fn default() -> Self {
        Self::new()
    }
}

impl Haptics for BellHaptics {
    fn pulse(&self) {
        if let Some(display) = &self.display {
            display.beep();
        }
    }
}
