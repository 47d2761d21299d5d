//! UI layer for the card table: app shell, card painter, and colors.

pub mod app;
pub mod card_view;
pub mod theme;

pub use app::{CardTableApp, StartupConfig};
