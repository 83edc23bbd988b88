pub mod config;
pub mod database;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;
