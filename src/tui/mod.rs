//! Terminal user interface.

mod app;
pub mod styles;
mod ui;

pub use app::App;
