pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;
