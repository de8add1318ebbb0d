pub mod config;
pub mod error;
pub mod escape;
pub mod models;
pub mod render;
