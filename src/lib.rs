pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod food;
pub mod state;
pub mod storage;
