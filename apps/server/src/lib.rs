//! Giftwise web server: REST API plus the session gate, built on the
//! `giftwise-core` services and the SQLite storage layer.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod models;

pub use main_lib::{build_state, init_tracing, AppState};
