//! # Inventory HTTP Server Module
//!
//! Axum server exposing the product API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/product` - List and create products
//! - `/api/product/:id` - Read, update and delete one product

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod product_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use product_routes::ProductState;
pub use response::Envelope;
pub use server::HttpServer;
