//! UI layer for the desktop finder: app shell and the wheel painter.

pub mod app;
pub mod wheel_view;

pub use app::FinderApp;
