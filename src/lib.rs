//! Biblion Library Lending Service
//!
//! A Rust REST API server for tracking a library's books, borrowers, and
//! the borrow/return lifecycle, with at-most-one-active-loan enforcement
//! per book.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
