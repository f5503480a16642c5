pub mod client;
pub mod config;

pub use client::ConfigClient;
pub use config::ClientConfig;
