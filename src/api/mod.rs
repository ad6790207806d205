//! API handlers for the Biblion REST endpoints

pub mod books;
pub mod borrowers;
pub mod health;
pub mod lending;
pub mod openapi;
