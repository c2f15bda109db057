//! Navigation core for a click-wheel style player UI.
//!
//! Pointer samples on the wheel become [`geometry::Rotation`]s, rotations move
//! the selection of the active [`view::Frame`], and a commit on the centre
//! button resolves the highlighted [`menu::MenuItem`] into a
//! [`dispatch::Effect`]. Everything here is pure state; work that needs I/O
//! leaves the [`controller::Controller`] as [`controller::Outbound`] requests.

pub mod macros;

pub mod catalog;
pub mod collab;
pub mod controller;
pub mod dispatch;
pub mod geometry;
pub mod menu;
pub mod reducer;
pub mod view;

pub use controller::Controller;
pub use dispatch::Effect;
pub use geometry::{Point, Rotation, Wheel};
pub use view::ViewContext;
