pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod models;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod validation;
pub mod wizard;
