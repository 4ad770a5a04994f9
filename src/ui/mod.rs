//! Terminal UI: play Connect Four against the search agent.

mod app;
mod game_view;

pub use app::App;
