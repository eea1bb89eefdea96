pub mod app;
pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;
pub mod views;
