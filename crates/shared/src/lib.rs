pub mod config;
pub mod coords;
pub mod history;
pub mod layout;
pub mod models;
pub mod render;
pub mod state;
pub mod store;
