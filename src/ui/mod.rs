//! TUI module for the element quiz.

mod app;
pub mod theme;
mod widgets;

pub use app::App;
