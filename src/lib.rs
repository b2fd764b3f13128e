// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod page;
pub mod routes;
pub mod state;
pub mod utils;

pub use routes::create_router;
