pub mod config;
pub mod handlers;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod state;
pub mod storage;
pub mod utils;
