//! Terminal UI: play Connect Four against the configured computer opponent.

mod app;
mod game_view;

pub use app::App;
