pub mod api;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod render;
pub mod session;
