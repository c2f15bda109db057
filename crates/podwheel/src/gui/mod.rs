pub mod app;
pub mod confirm;
pub mod theme;
pub mod wheel;
pub mod window;
