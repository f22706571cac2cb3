pub mod app;
pub mod game_view;
