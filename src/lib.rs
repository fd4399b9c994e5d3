// src/lib.rs

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod names;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

pub use routes::create_router;
