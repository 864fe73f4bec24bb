//! inventory - a product inventory service backed by a document store

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod product;
pub mod store;
