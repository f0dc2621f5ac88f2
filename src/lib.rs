pub mod cli;
pub mod config;
pub mod fetch;
pub mod html;
pub mod logging;
pub mod model;
pub mod provider;
pub mod scorer;
pub mod state;
pub mod timer;
pub mod tui;
pub mod ui;
