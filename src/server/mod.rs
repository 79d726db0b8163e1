//! HTTP server implementation
//!
//! This module provides the collecting server and its routes.

pub mod routes;

pub mod server;
pub mod state;
mod integrity;
mod utils;


pub use server::{HttpServer, create_app, run_server};
pub use state::AppState;
