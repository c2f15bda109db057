pub mod model;
pub mod view;

pub use model::{Layout, Rect, Zone};
pub use view::draw;

pub const WINDOW_WIDTH: i32 = 320;
pub const WINDOW_HEIGHT: i32 = 540;
pub const REFERENCE_WIDTH: f64 = 320.0;
pub const SCREEN_MARGIN: f64 = 16.0;
pub const SCREEN_ASPECT: f64 = 0.75; // screen height relative to its width
pub const SCREEN_CORNER_RADIUS: f64 = 8.0;
pub const TITLE_HEIGHT: f64 = 26.0;
pub const ROW_HEIGHT: f64 = 24.0;
pub const ROW_PADDING: f64 = 8.0;
pub const FONT_SIZE: f64 = 13.0;
pub const WHEEL_RADIUS_FACTOR: f64 = 0.4; // of the window width
pub const LABEL_RING_FACTOR: f64 = 0.7; // button labels, relative to the wheel radius
pub const BUTTON_HALF_ARC: f64 = 45.0; // degrees either side of a button's centre
